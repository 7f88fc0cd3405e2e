// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;

use anyhow::{Context, Result};

use rentsheet::remote::HttpDocument;
use rentsheet::shell::Shell;
use rentsheet::store::LocalStore;
use rentsheet::{cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    if let Some(("config", sub)) = matches.subcommand() {
        return commands::config::handle(&conn, sub);
    }
    let remote_url = utils::get_remote_url(&conn)?;
    let interval = utils::get_poll_interval(&conn)?;

    let mut shell = Shell::open(LocalStore::new(conn)).context("Load local snapshot")?;
    if let Some(url) = remote_url {
        tracing::debug!(%url, "using remote document");
        shell = shell.with_remote(Arc::new(HttpDocument::new(utils::http_client()?, url)));
    }

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("property", sub)) => commands::properties::handle(&mut shell, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut shell, sub)?,
        Some(("service", sub)) => commands::services::handle(&mut shell, sub)?,
        Some(("sheet", sub)) => commands::sheets::handle(&shell, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&shell, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut shell, sub)?,
        Some(("sync", sub)) => commands::sync::handle(&mut shell, sub, interval)?,
        Some(("doctor", _)) => commands::doctor::handle(&shell)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
