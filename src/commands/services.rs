// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::models::ServiceType;
use crate::shell::Shell;
use crate::store::SnapshotStore;
use crate::utils::{maybe_print_json, parse_service, period_or_current, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: SnapshotStore>(shell: &mut Shell<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("toggle", sub)) => {
            let period = period_or_current(sub.get_one::<String>("month"))?;
            let service = parse_service(required(sub, "service")?)?;
            let property = required(sub, "property")?;
            let paid = shell.toggle_service(property, period, service)?;
            println!(
                "{} for {} in {}: {}",
                service.label(),
                property,
                period,
                if paid { "paid" } else { "pending" }
            );
        }
        Some(("show", sub)) => show(shell, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct ServiceRow {
    property: String,
    service: &'static str,
    paid: bool,
}

fn show<S: SnapshotStore>(shell: &Shell<S>, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_or_current(sub.get_one::<String>("month"))?;
    let state = shell.state();
    let mut data = Vec::new();
    for p in state.sheet_properties() {
        let record = state.service_record(&p.id, period);
        for s in ServiceType::checklist(p) {
            data.push(ServiceRow {
                property: p.name.clone(),
                service: s.label(),
                paid: record.is_some_and(|r| r.is_paid(*s)),
            });
        }
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.property.clone(),
                    r.service.to_string(),
                    if r.paid { "SI" } else { "NO" }.to_string(),
                ]
            })
            .collect();
        println!("Services for {}", period);
        println!("{}", pretty_table(&["Property", "Service", "Paid"], rows));
    }
    Ok(())
}
