// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! File renderings of the state: period report and template as CSV, full
//! backup as JSON.

use chrono::NaiveDate;
use csv::WriterBuilder;
use rust_decimal::Decimal;

use crate::errors::{Result, SheetError};
use crate::models::{AppState, Period, Property, ServiceType, Transaction, TransactionType};

const REPORT_HEADER: [&str; 8] = [
    "Date",
    "Property",
    "Type",
    "Category/Description",
    "Handler",
    "Income(+)",
    "Expense(-)",
    "ServicesPaid",
];

const TEMPLATE_HEADER: [&str; 7] = [
    "Date",
    "Property",
    "Concept",
    "Handler (ME/SISTER)",
    "Income",
    "Expense",
    "Notes",
];

pub fn period_file_name(period: Period) -> String {
    format!("rent_report_{}_{}.csv", period.month + 1, period.year)
}

pub fn template_file_name() -> String {
    "rent_template.csv".to_string()
}

pub fn backup_file_name(today: NaiveDate) -> String {
    format!("rent_backup_{}.json", today.format("%Y-%m-%d"))
}

/// A transaction belongs to the report when it happened within the month or
/// its rent is attributed to it.
fn in_report(t: &Transaction, period: Period) -> bool {
    period.contains(t.date) || t.period() == Some(period)
}

fn csv_section(rows: Vec<Vec<String>>) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for row in rows {
        wtr.write_record(&row)?;
    }
    wtr.into_inner().map_err(|e| SheetError::Io(e.into_error()))
}

pub fn export_period(state: &AppState, period: Period) -> Result<Vec<u8>> {
    let mut rows = vec![vec!["Monthly Report".to_string(), period.to_string()]];
    rows.push(REPORT_HEADER.iter().map(|h| h.to_string()).collect());
    for t in state.transactions.iter().filter(|t| in_report(t, period)) {
        let property = state
            .property(&t.property_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let (kind, detail, income, expense) = match t.kind {
            TransactionType::Income => ("Rent", t.description.clone(), t.amount, Decimal::ZERO),
            TransactionType::Expense => (
                "Expense",
                t.category
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_else(|| "Expense".to_string()),
                Decimal::ZERO,
                t.amount,
            ),
        };
        rows.push(vec![
            t.date.format("%d/%m/%Y").to_string(),
            property,
            kind.to_string(),
            detail,
            t.handled_by.label().to_string(),
            income.to_string(),
            expense.to_string(),
            "-".to_string(),
        ]);
    }
    let mut out = csv_section(rows)?;

    let records: Vec<_> = state
        .properties
        .iter()
        .filter_map(|p| state.service_record(&p.id, period).map(|r| (p, r)))
        .collect();
    if !records.is_empty() {
        out.push(b'\n');
        let mut rows = vec![vec!["Service Status (SI=paid, NO=pending)".to_string()]];
        let mut header = vec!["Property".to_string()];
        header.extend(ServiceType::UTILITIES.iter().map(|s| s.label().to_string()));
        rows.push(header);
        for (p, r) in records {
            let mut row = vec![p.name.clone()];
            row.extend(
                ServiceType::UTILITIES
                    .iter()
                    .map(|s| if r.is_paid(*s) { "SI" } else { "NO" }.to_string()),
            );
            rows.push(row);
        }
        out.extend(csv_section(rows)?);
    }
    Ok(out)
}

pub fn export_template(properties: &[Property]) -> Result<Vec<u8>> {
    let mut rows = vec![TEMPLATE_HEADER.iter().map(|h| h.to_string()).collect()];
    for p in properties {
        rows.push(vec![
            String::new(),
            p.name.clone(),
            "Rent collection".to_string(),
            "ME".to_string(),
            p.rent_amount.to_string(),
            String::new(),
            String::new(),
        ]);
    }
    csv_section(rows)
}

pub fn export_full(state: &AppState) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(state)?)
}

/// Parses a backup. The document must carry `properties` and `transactions`.
pub fn import_full(bytes: &[u8]) -> Result<AppState> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| SheetError::InvalidFile(format!("not valid JSON: {}", e)))?;
    for key in ["properties", "transactions"] {
        if value.get(key).is_none() {
            return Err(SheetError::InvalidFile(format!("missing '{}'", key)));
        }
    }
    let state: AppState = serde_json::from_value(value)
        .map_err(|e| SheetError::InvalidFile(e.to_string()))?;
    Ok(state.normalize())
}
