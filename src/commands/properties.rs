// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::shell::{NewProperty, Shell};
use crate::store::SnapshotStore;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle<S: SnapshotStore>(shell: &mut Shell<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let new = NewProperty {
                name: required(sub, "name")?.to_string(),
                address: sub.get_one::<String>("address").cloned().unwrap_or_default(),
                tenant_name: sub.get_one::<String>("tenant").cloned().unwrap_or_default(),
                rent_amount: parse_decimal(required(sub, "rent")?)?,
                due_day: sub.get_one::<u32>("due-day").copied().unwrap_or(1),
            };
            let p = shell.add_property(new)?;
            println!("Added property '{}' (id: {})", p.name, p.id);
        }
        Some(("edit", sub)) => {
            let id = shell.find_property(required(sub, "property")?)?.id.clone();
            let name = sub.get_one::<String>("name").cloned();
            let address = sub.get_one::<String>("address").cloned();
            let tenant = sub.get_one::<String>("tenant").cloned();
            let rent = sub
                .get_one::<String>("rent")
                .map(|r| parse_decimal(r))
                .transpose()?;
            let due_day = sub.get_one::<u32>("due-day").copied();
            let p = shell.update_property(&id, |p| {
                if let Some(v) = name {
                    p.name = v;
                }
                if let Some(v) = address {
                    p.address = v;
                }
                if let Some(v) = tenant {
                    p.tenant_name = v;
                }
                if let Some(v) = rent {
                    p.rent_amount = v;
                }
                if let Some(v) = due_day {
                    p.due_day = v;
                }
            })?;
            println!("Updated property '{}'", p.name);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let props = &shell.state().properties;
            if !maybe_print_json(json_flag, jsonl_flag, props)? {
                let rows = props
                    .iter()
                    .map(|p| {
                        vec![
                            p.id.clone(),
                            p.name.clone(),
                            p.address.clone(),
                            p.tenant_name.clone(),
                            fmt_money(&p.rent_amount),
                            if p.is_common { "-".into() } else { p.due_day.to_string() },
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Name", "Address", "Tenant", "Rent", "Due day"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}
