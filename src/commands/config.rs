// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::utils::{
    clear_setting, get_poll_interval, get_remote_url, pretty_table, set_setting,
};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let remote = get_remote_url(conn)?.unwrap_or_else(|| "(local only)".into());
            let poll = match get_poll_interval(conn) {
                Ok(d) => d.as_secs().to_string(),
                Err(e) => format!("{:#}", e),
            };
            println!(
                "{}",
                pretty_table(
                    &["Setting", "Value"],
                    vec![
                        vec!["remote_url".into(), remote],
                        vec!["poll_secs".into(), poll],
                    ],
                )
            );
        }
        Some(("set-remote", sub)) => {
            let url = required(sub, "url")?.trim();
            reqwest::Url::parse(url).with_context(|| format!("Invalid URL '{}'", url))?;
            set_setting(conn, "remote_url", url)?;
            println!("Remote document set to {}", url);
        }
        Some(("clear-remote", _)) => {
            clear_setting(conn, "remote_url")?;
            println!("Remote document cleared; working locally");
        }
        Some(("set-poll", sub)) => {
            let secs = sub.get_one::<u64>("secs").copied().unwrap_or(1).max(1);
            set_setting(conn, "poll_secs", &secs.to_string())?;
            println!("Remote poll interval set to {}s", secs);
        }
        _ => {}
    }
    Ok(())
}
