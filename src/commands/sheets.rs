// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::models::AppState;
use crate::sheets::{
    MonthlySheet, SettlementStatus, monthly_sheet, rent_status, yearly_summary,
};
use crate::shell::Shell;
use crate::store::SnapshotStore;
use crate::utils::{
    fmt_money, maybe_print_json, period_or_current, pretty_table, today, year_or_current,
};
use anyhow::Result;
use serde_json::json;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn handle<S: SnapshotStore>(shell: &Shell<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(shell.state(), sub)?,
        Some(("year", sub)) => year(shell.state(), sub)?,
        Some(("rent-status", sub)) => status(shell, sub)?,
        _ => {}
    }
    Ok(())
}

fn month(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_or_current(sub.get_one::<String>("month"))?;
    let sheet = monthly_sheet(state, period);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &sheet)? {
        print_monthly(&sheet);
    }
    Ok(())
}

pub fn settlement_line(status: SettlementStatus) -> String {
    match status {
        SettlementStatus::Even => "Accounts are even, no transfer needed".to_string(),
        SettlementStatus::IPay(amt) => format!("I must transfer {} to my sister", fmt_money(&amt)),
        SettlementStatus::SisterPays(amt) => {
            format!("My sister must transfer {} to me", fmt_money(&amt))
        }
    }
}

pub fn print_monthly(sheet: &MonthlySheet<'_>) {
    let rows = sheet
        .rows
        .iter()
        .map(|r| {
            let income = match r.income_tx {
                Some(t) => format!("{} ({})", fmt_money(&r.income), t.handled_by.label()),
                None => "-".to_string(),
            };
            let expenses = r
                .expenses
                .iter()
                .map(|e| {
                    format!(
                        "{} {} ({})",
                        e.category.map(|c| c.as_str()).unwrap_or("EXPENSE"),
                        fmt_money(&e.amount),
                        e.handled_by.label()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            let services = r
                .services
                .iter()
                .map(|(s, paid)| format!("{} {}", s.label(), if *paid { "SI" } else { "NO" }))
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                r.property.name.clone(),
                income,
                expenses,
                services,
                fmt_money(&r.net),
            ]
        })
        .collect();
    println!("Monthly sheet {} {}", sheet.period.month_name(), sheet.period.year);
    println!(
        "{}",
        pretty_table(&["Property", "Income", "Expenses", "Services", "Net"], rows)
    );
    let s = &sheet.settlement;
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Net", "My cash", "Sister cash", "Half share"],
            vec![vec![
                fmt_money(&sheet.global_income),
                fmt_money(&sheet.global_expense),
                fmt_money(&sheet.global_net),
                fmt_money(&s.my_cash),
                fmt_money(&s.sister_cash),
                fmt_money(&s.target_share),
            ]],
        )
    );
    println!("{}", settlement_line(s.status()));
}

fn year(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let year = year_or_current(sub.get_one::<i32>("year"));
    let summary = yearly_summary(state, year);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        let mut headers = vec!["Property"];
        headers.extend(MONTH_ABBR);
        headers.push("Total");
        let mut rows: Vec<Vec<String>> = summary
            .rows
            .iter()
            .map(|r| {
                let mut row = vec![r.property.name.clone()];
                row.extend(r.months.iter().map(|m| fmt_money(&m.net)));
                row.push(fmt_money(&r.total_net));
                row
            })
            .collect();
        let mut totals = vec!["TOTAL".to_string()];
        totals.extend(summary.monthly_totals.iter().map(fmt_money));
        totals.push(fmt_money(&summary.grand_total));
        rows.push(totals);
        println!("Yearly summary {}", year);
        println!("{}", pretty_table(&headers, rows));
    }
    Ok(())
}

fn status<S: SnapshotStore>(shell: &Shell<S>, sub: &clap::ArgMatches) -> Result<()> {
    let property = shell.find_property(required(sub, "property")?)?;
    let year = year_or_current(sub.get_one::<i32>("year"));
    let grid = rent_status(shell.state(), property, year, today());
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if json_flag || jsonl_flag {
        let v = json!({ "property": property.id, "year": year, "months": grid });
        maybe_print_json(json_flag, jsonl_flag, &v)?;
    } else {
        let rows = MONTH_ABBR
            .iter()
            .zip(grid.iter())
            .map(|(m, s)| vec![m.to_string(), s.label()])
            .collect();
        println!("Rent status {} {}", property.name, year);
        println!("{}", pretty_table(&["Month", "Status"], rows));
    }
    Ok(())
}
