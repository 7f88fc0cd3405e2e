// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{expense_dated_in, income_matches};
use crate::models::{AppState, Period, Property};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthFigures {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRow<'a> {
    pub property: &'a Property,
    pub months: [MonthFigures; 12],
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub total_net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySummary<'a> {
    pub year: i32,
    pub rows: Vec<YearlyRow<'a>>,
    pub monthly_totals: [Decimal; 12],
    pub grand_total: Decimal,
}

/// Twelve monthly figures per property. Income is placed by its attributed
/// period; expenses by their calendar date, unlike the monthly sheet.
pub fn yearly_summary(state: &AppState, year: i32) -> YearlySummary<'_> {
    let mut rows = Vec::new();
    for property in state.sheet_properties() {
        let mut months = [MonthFigures::default(); 12];
        for (month, figures) in (0u32..).zip(months.iter_mut()) {
            let period = Period { month, year };
            let income: Decimal = state
                .transactions
                .iter()
                .filter(|t| income_matches(t, &property.id, period))
                .map(|t| t.amount)
                .sum();
            let expense: Decimal = state
                .transactions
                .iter()
                .filter(|t| expense_dated_in(t, &property.id, period))
                .map(|t| t.amount)
                .sum();
            *figures = MonthFigures {
                income,
                expense,
                net: income - expense,
            };
        }
        rows.push(YearlyRow {
            property,
            total_income: months.iter().map(|m| m.income).sum(),
            total_expense: months.iter().map(|m| m.expense).sum(),
            total_net: months.iter().map(|m| m.net).sum(),
            months,
        });
    }

    let mut monthly_totals = [Decimal::ZERO; 12];
    for row in &rows {
        for (total, m) in monthly_totals.iter_mut().zip(row.months.iter()) {
            *total += m.net;
        }
    }
    let grand_total = rows.iter().map(|r| r.total_net).sum();

    YearlySummary {
        year,
        rows,
        monthly_totals,
        grand_total,
    }
}
