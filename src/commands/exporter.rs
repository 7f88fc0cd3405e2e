// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::export::{
    backup_file_name, export_full, export_period, export_template, period_file_name,
    template_file_name,
};
use crate::shell::Shell;
use crate::store::SnapshotStore;
use crate::utils::{period_or_current, today};
use anyhow::{Context, Result};

pub fn handle<S: SnapshotStore>(shell: &Shell<S>, m: &clap::ArgMatches) -> Result<()> {
    let state = shell.state();
    let (bytes, default_name) = match m.subcommand() {
        Some(("period", sub)) => {
            let period = period_or_current(sub.get_one::<String>("month"))?;
            (export_period(state, period)?, period_file_name(period))
        }
        Some(("template", _)) => (export_template(&state.properties)?, template_file_name()),
        Some(("backup", _)) => (export_full(state)?, backup_file_name(today())),
        _ => return Ok(()),
    };
    let out = m
        .subcommand()
        .and_then(|(_, sub)| sub.get_one::<String>("out"))
        .cloned()
        .unwrap_or(default_name);
    std::fs::write(&out, bytes).with_context(|| format!("Write {}", out))?;
    println!("Exported to {}", out);
    Ok(())
}
