// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views computed from an `AppState` snapshot. Every function here is
//! pure: no I/O, no mutation of the state.

pub mod monthly;
pub mod rent_status;
pub mod yearly;

use crate::models::{Period, Transaction};

pub use monthly::{MonthlyRow, MonthlySheet, Settlement, SettlementStatus, monthly_sheet};
pub use rent_status::{RentStatus, rent_status};
pub use yearly::{MonthFigures, YearlyRow, YearlySummary, yearly_summary};

/// Income belongs to the period it was attributed to, never to its date.
pub fn income_matches(t: &Transaction, property_id: &str, period: Period) -> bool {
    t.property_id == property_id && t.is_income() && t.period() == Some(period)
}

/// Expense placement on the monthly sheet: the attributed period wins when
/// recorded, older entries without one fall back to the calendar date.
pub fn expense_matches(t: &Transaction, property_id: &str, period: Period) -> bool {
    if t.property_id != property_id || !t.is_expense() {
        return false;
    }
    match t.period() {
        Some(assigned) => assigned == period,
        None => period.contains(t.date),
    }
}

/// Expense placement on the yearly rollup, by calendar date only.
pub fn expense_dated_in(t: &Transaction, property_id: &str, period: Period) -> bool {
    t.property_id == property_id && t.is_expense() && period.contains(t.date)
}
