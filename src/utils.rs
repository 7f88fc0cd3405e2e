// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use crate::models::{Agent, ExpenseCategory, Period, ServiceType, TransactionType};

const UA: &str = concat!(
    "rentsheet/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/rentsheet)"
);

pub const DEFAULT_POLL_SECS: u64 = 15;

static TRACING_INIT: Once = Once::new();

const DEFAULT_LOG_FILTER: &str = "rentsheet=warn";

/// Filter built from a `RUST_LOG` value; unset, blank or unparsable values
/// fall back to warnings from this crate.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the stderr tracing subscriber; `RUST_LOG` overrides the default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        tracing_subscriber::fmt()
            .with_env_filter(log_filter(env.as_deref()))
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn new_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..12].to_string()
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parses `YYYY-MM` into a sheet period.
pub fn parse_period(s: &str) -> Result<Period> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(Period::of_date(d))
}

/// The period given on the command line, or the current month.
pub fn period_or_current(arg: Option<&String>) -> Result<Period> {
    match arg {
        Some(s) => parse_period(s),
        None => Ok(Period::of_date(today())),
    }
}

pub fn year_or_current(arg: Option<&i32>) -> i32 {
    arg.copied().unwrap_or_else(|| today().year())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_kind(s: &str) -> Result<TransactionType> {
    match s.trim().to_ascii_lowercase().as_str() {
        "income" | "rent" => Ok(TransactionType::Income),
        "expense" => Ok(TransactionType::Expense),
        other => Err(anyhow::anyhow!("Unknown type '{}' (use income|expense)", other)),
    }
}

pub fn parse_agent(s: &str) -> Result<Agent> {
    match s.trim().to_ascii_lowercase().as_str() {
        "me" => Ok(Agent::Me),
        "sister" => Ok(Agent::Sister),
        other => Err(anyhow::anyhow!("Unknown handler '{}' (use me|sister)", other)),
    }
}

pub fn parse_category(s: &str) -> Result<ExpenseCategory> {
    match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
        "REPAIR" => Ok(ExpenseCategory::Repair),
        "TAX" => Ok(ExpenseCategory::Tax),
        "EXTRA_HOA" => Ok(ExpenseCategory::ExtraHoa),
        "MAINTENANCE" => Ok(ExpenseCategory::Maintenance),
        "OTHER" => Ok(ExpenseCategory::Other),
        other => Err(anyhow::anyhow!(
            "Unknown category '{}' (use repair|tax|extra-hoa|maintenance|other)",
            other
        )),
    }
}

pub fn parse_service(s: &str) -> Result<ServiceType> {
    match s.trim().to_ascii_lowercase().as_str() {
        "light" | "luz" => Ok(ServiceType::Light),
        "gas" => Ok(ServiceType::Gas),
        "water" | "agua" => Ok(ServiceType::Water),
        "abl" => Ok(ServiceType::Abl),
        "rentas" => Ok(ServiceType::Rentas),
        "expensas-extra" | "exp. extra" => Ok(ServiceType::ExpensasExtra),
        other => Err(anyhow::anyhow!(
            "Unknown service '{}' (use light|gas|water|abl|rentas|expensas-extra)",
            other
        )),
    }
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Settings
pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn clear_setting(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
    Ok(())
}

pub fn get_remote_url(conn: &Connection) -> Result<Option<String>> {
    Ok(get_setting(conn, "remote_url")?.filter(|u| !u.trim().is_empty()))
}

pub fn get_poll_interval(conn: &Connection) -> Result<Duration> {
    let secs = match get_setting(conn, "poll_secs")? {
        Some(s) => s
            .parse::<u64>()
            .with_context(|| format!("Invalid poll_secs setting '{}'", s))?,
        None => DEFAULT_POLL_SECS,
    };
    Ok(Duration::from_secs(secs.max(1)))
}
