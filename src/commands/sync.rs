// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::{Arc, mpsc};
use std::time::Duration;

use crate::commands::sheets::print_monthly;
use crate::remote::subscribe;
use crate::sheets::monthly_sheet;
use crate::shell::Shell;
use crate::store::SnapshotStore;
use crate::utils::period_or_current;
use anyhow::{Result, anyhow};

pub fn handle<S: SnapshotStore>(
    shell: &mut Shell<S>,
    m: &clap::ArgMatches,
    interval: Duration,
) -> Result<()> {
    match m.subcommand() {
        Some(("push", _)) => {
            shell.push()?;
            println!("Pushed local state to the remote document");
        }
        Some(("pull", _)) => {
            if shell.pull()? {
                println!("Replaced local state with the remote document");
            } else {
                println!("Remote document is empty; local state kept");
            }
        }
        Some(("watch", sub)) => watch(shell, sub, interval)?,
        _ => {}
    }
    Ok(())
}

/// Follows the remote document and reprints the monthly sheet on every
/// change until interrupted.
fn watch<S: SnapshotStore>(
    shell: &mut Shell<S>,
    sub: &clap::ArgMatches,
    interval: Duration,
) -> Result<()> {
    let period = period_or_current(sub.get_one::<String>("month"))?;
    let remote = shell
        .remote()
        .cloned()
        .ok_or_else(|| anyhow!("No remote document configured (see `config set-remote`)"))?;
    let (tx, rx) = mpsc::channel();
    let _sub = subscribe(Arc::clone(&remote), interval, move |state| {
        let _ = tx.send(state);
    });
    println!("Watching remote document every {}s", interval.as_secs());
    for state in rx {
        shell.apply_remote(state);
        print_monthly(&monthly_sheet(shell.state(), period));
    }
    Ok(())
}
