// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::income_matches;
use crate::models::{AppState, Period, Property};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentStatus {
    Paid { amount: Decimal, date: NaiveDate },
    Late,
    Pending,
    Future,
}

impl RentStatus {
    pub fn label(&self) -> String {
        match self {
            RentStatus::Paid { amount, date } => {
                format!("paid {} on {}", amount.round_dp(2), date.format("%d/%m"))
            }
            RentStatus::Late => "late".into(),
            RentStatus::Pending => "pending".into(),
            RentStatus::Future => "-".into(),
        }
    }
}

/// Collection status of each month of `year` for one property, as seen on
/// `today`.
pub fn rent_status(
    state: &AppState,
    property: &Property,
    year: i32,
    today: NaiveDate,
) -> [RentStatus; 12] {
    let current = Period::of_date(today);
    let mut out = [RentStatus::Future; 12];
    for (month, slot) in (0u32..).zip(out.iter_mut()) {
        let period = Period { month, year };
        let paid = state
            .transactions
            .iter()
            .find(|t| income_matches(t, &property.id, period));
        *slot = match paid {
            Some(t) => RentStatus::Paid {
                amount: t.amount,
                date: t.date,
            },
            None if period > current => RentStatus::Future,
            None if today >= due_date(period, property.due_day) => RentStatus::Late,
            None => RentStatus::Pending,
        };
    }
    out
}

/// Due date within the period; days past the month's end clamp to its last day.
fn due_date(period: Period, due_day: u32) -> NaiveDate {
    let (first, last) = period.bounds();
    first
        .with_day(due_day.max(1))
        .filter(|d| *d <= last)
        .unwrap_or(last)
}
