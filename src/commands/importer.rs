// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::shell::Shell;
use crate::store::SnapshotStore;
use anyhow::{Context, Result};

pub fn handle<S: SnapshotStore>(shell: &mut Shell<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => import_backup(shell, sub),
        _ => Ok(()),
    }
}

fn import_backup<S: SnapshotStore>(shell: &mut Shell<S>, sub: &clap::ArgMatches) -> Result<()> {
    let path = required(sub, "path")?.trim();
    let bytes = std::fs::read(path).with_context(|| format!("Open backup {}", path))?;
    shell
        .import_backup(&bytes)
        .with_context(|| format!("Import {}", path))?;
    let state = shell.state();
    println!(
        "Imported {} properties and {} transactions from {}",
        state.properties.len(),
        state.transactions.len(),
        path
    );
    Ok(())
}
