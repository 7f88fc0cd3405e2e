// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::models::Transaction;
use crate::sheets::{expense_matches, income_matches};
use crate::shell::Shell;
use crate::store::SnapshotStore;
use crate::utils::{
    fmt_money, maybe_print_json, parse_agent, parse_category, parse_date, parse_decimal,
    parse_kind, parse_period, period_or_current, pretty_table, today,
};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: SnapshotStore>(shell: &mut Shell<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(shell, sub)?,
        Some(("edit", sub)) => edit(shell, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            let removed = shell.delete_transaction(id)?;
            println!("Removed transaction {} ({})", removed.id, removed.date);
        }
        Some(("list", sub)) => list(shell, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: SnapshotStore>(shell: &mut Shell<S>, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(required(sub, "type")?)?;
    let period = period_or_current(sub.get_one::<String>("month"))?;
    let mut draft = shell.draft_transaction(required(sub, "property")?, kind, period, today())?;

    if let Some(a) = sub.get_one::<String>("amount") {
        draft.amount = parse_decimal(a)?;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        draft.date = parse_date(d)?;
    }
    if let Some(h) = sub.get_one::<String>("handler") {
        draft.handled_by = parse_agent(h)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        draft.category = Some(parse_category(c)?);
    }
    if let Some(d) = sub.get_one::<String>("description") {
        draft.description = d.to_string();
    }

    let tx = shell.add_transaction(draft)?;
    println!(
        "Recorded {:?} {} for {} on {} (id: {})",
        tx.kind,
        fmt_money(&tx.amount),
        period,
        tx.date,
        tx.id
    );
    Ok(())
}

fn edit<S: SnapshotStore>(shell: &mut Shell<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let property_id = match sub.get_one::<String>("property") {
        Some(p) => Some(shell.find_property(p)?.id.clone()),
        None => None,
    };
    let amount = sub.get_one::<String>("amount").map(|a| parse_decimal(a)).transpose()?;
    let date = sub.get_one::<String>("date").map(|d| parse_date(d)).transpose()?;
    let handler = sub.get_one::<String>("handler").map(|h| parse_agent(h)).transpose()?;
    let category = sub.get_one::<String>("category").map(|c| parse_category(c)).transpose()?;
    let period = sub.get_one::<String>("month").map(|p| parse_period(p)).transpose()?;
    let description = sub.get_one::<String>("description").cloned();
    let drop_period = sub.get_flag("no-period");

    let tx = shell.update_transaction(id, |t| {
        if let Some(p) = property_id {
            t.property_id = p;
        }
        if let Some(a) = amount {
            t.amount = a;
        }
        if let Some(d) = date {
            t.date = d;
        }
        if let Some(h) = handler {
            t.handled_by = h;
        }
        if category.is_some() {
            t.category = category;
        }
        if let Some(d) = description {
            t.description = d;
        }
        if period.is_some() || drop_period {
            t.set_period(period);
        }
    })?;
    println!("Updated transaction {}", tx.id);
    Ok(())
}

fn list<S: SnapshotStore>(shell: &Shell<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(shell, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.property.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.period.clone(),
                    r.handler.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id", "Date", "Property", "Type", "Category", "Period", "Handler", "Amount",
                    "Description"
                ],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub property: String,
    pub kind: String,
    pub category: String,
    pub period: String,
    pub handler: String,
    pub amount: String,
    pub description: String,
}

/// Transactions in collection order (newest first), optionally limited to
/// those placed on one monthly sheet.
pub fn query_rows<S: SnapshotStore>(
    shell: &Shell<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let state = shell.state();
    let period = sub.get_one::<String>("month").map(|m| parse_period(m)).transpose()?;
    let property = match sub.get_one::<String>("property") {
        Some(p) => Some(shell.find_property(p)?.id.clone()),
        None => None,
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let on_sheet = |t: &Transaction| match period {
        Some(p) => income_matches(t, &t.property_id, p) || expense_matches(t, &t.property_id, p),
        None => true,
    };

    let data = state
        .transactions
        .iter()
        .filter(|t| property.as_ref().is_none_or(|p| &t.property_id == p))
        .filter(|t| on_sheet(t))
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            property: state
                .property(&t.property_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| t.property_id.clone()),
            kind: format!("{:?}", t.kind).to_uppercase(),
            category: t.category.map(|c| c.as_str().to_string()).unwrap_or_default(),
            period: t.period().map(|p| p.to_string()).unwrap_or_default(),
            handler: t.handled_by.label().to_string(),
            amount: fmt_money(&t.amount),
            description: t.description.clone(),
        })
        .collect();
    Ok(data)
}
