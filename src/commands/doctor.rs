// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::models::{AppState, Period};
use crate::shell::Shell;
use crate::store::SnapshotStore;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle<S: SnapshotStore>(shell: &Shell<S>) -> Result<()> {
    let rows = check(shell.state());
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Consistency problems as `[issue, detail]` rows.
pub fn check(state: &AppState) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Exactly one common property
    let commons = state.properties.iter().filter(|p| p.is_common).count();
    if commons != 1 {
        rows.push(vec!["common_property_count".into(), commons.to_string()]);
    }

    // 2) Dangling property references
    for t in &state.transactions {
        if state.property(&t.property_id).is_none() {
            rows.push(vec![
                "unknown_property".into(),
                format!("tx {} -> {}", t.id, t.property_id),
            ]);
        }
        if t.is_income() && t.category.is_some() {
            rows.push(vec!["income_with_category".into(), t.id.clone()]);
        }
    }

    // 3) More than one rent entry per property and period
    let mut incomes: HashMap<(&str, Period), Vec<&str>> = HashMap::new();
    for t in state.transactions.iter().filter(|t| t.is_income()) {
        if let Some(p) = t.period() {
            incomes
                .entry((t.property_id.as_str(), p))
                .or_default()
                .push(t.id.as_str());
        }
    }
    let mut dupes: Vec<_> = incomes.into_iter().filter(|(_, ids)| ids.len() > 1).collect();
    dupes.sort_by(|a, b| a.0.cmp(&b.0));
    for ((property, period), ids) in dupes {
        rows.push(vec![
            "duplicate_income".into(),
            format!("{} {}: {}", property, period, ids.join(", ")),
        ]);
    }

    // 4) Service records sharing a property and period
    let mut seen: HashMap<(&str, i32, u32), usize> = HashMap::new();
    for r in &state.service_records {
        *seen.entry((r.property_id.as_str(), r.year, r.month)).or_default() += 1;
    }
    let mut dup_records: Vec<_> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    dup_records.sort();
    for ((property, year, month), n) in dup_records {
        rows.push(vec![
            "duplicate_service_record".into(),
            format!("{} {:02}/{} x{}", property, month + 1, year, n),
        ]);
    }

    rows
}
