// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::{expense_matches, income_matches};
use crate::models::{Agent, AppState, Period, Property, ServiceType, Transaction};

/// Differences below this many currency units count as settled.
pub const SETTLEMENT_DEAD_ZONE: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRow<'a> {
    pub property: &'a Property,
    pub income: Decimal,
    pub income_tx: Option<&'a Transaction>,
    /// Further INCOME entries for the same period; not counted.
    pub ignored_income: usize,
    pub expenses: Vec<&'a Transaction>,
    pub total_expense: Decimal,
    pub net: Decimal,
    pub services: BTreeMap<ServiceType, bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub my_cash: Decimal,
    pub sister_cash: Decimal,
    pub target_share: Decimal,
    pub my_difference: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "amount", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementStatus {
    Even,
    /// I hold more than half the net and must hand over this much.
    IPay(Decimal),
    /// The other party holds more and must hand over this much.
    SisterPays(Decimal),
}

impl Settlement {
    pub fn status(&self) -> SettlementStatus {
        if self.my_difference.abs() < SETTLEMENT_DEAD_ZONE {
            SettlementStatus::Even
        } else if self.my_difference > Decimal::ZERO {
            SettlementStatus::IPay(self.my_difference)
        } else {
            SettlementStatus::SisterPays(-self.my_difference)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySheet<'a> {
    pub period: Period,
    pub rows: Vec<MonthlyRow<'a>>,
    pub global_income: Decimal,
    pub global_expense: Decimal,
    pub global_net: Decimal,
    pub settlement: Settlement,
}

pub fn monthly_sheet(state: &AppState, period: Period) -> MonthlySheet<'_> {
    let mut global_income = Decimal::ZERO;
    let mut global_expense = Decimal::ZERO;
    let mut my_cash = Decimal::ZERO;
    let mut sister_cash = Decimal::ZERO;

    let mut book = |agent: Agent, amount: Decimal| match agent {
        Agent::Me => my_cash += amount,
        Agent::Sister => sister_cash += amount,
    };

    let mut rows = Vec::new();
    for property in state.sheet_properties() {
        let mut incomes = state
            .transactions
            .iter()
            .filter(|t| income_matches(t, &property.id, period));
        let income_tx = incomes.next();
        let ignored_income = incomes.count();
        if ignored_income > 0 {
            tracing::warn!(
                property = %property.id,
                %period,
                ignored_income,
                "multiple rent entries for one period; using the first"
            );
        }

        let expenses: Vec<&Transaction> = state
            .transactions
            .iter()
            .filter(|t| expense_matches(t, &property.id, period))
            .collect();

        let income = income_tx.map(|t| t.amount).unwrap_or(Decimal::ZERO);
        let total_expense: Decimal = expenses.iter().map(|t| t.amount).sum();

        global_income += income;
        global_expense += total_expense;

        if let Some(t) = income_tx {
            book(t.handled_by, t.amount);
        }
        for e in &expenses {
            book(e.handled_by, -e.amount);
        }

        let record = state.service_record(&property.id, period);
        let services = ServiceType::checklist(property)
            .iter()
            .map(|s| (*s, record.is_some_and(|r| r.is_paid(*s))))
            .collect();

        rows.push(MonthlyRow {
            property,
            income,
            income_tx,
            ignored_income,
            expenses,
            total_expense,
            net: income - total_expense,
            services,
        });
    }

    let global_net = global_income - global_expense;
    let target_share = global_net / Decimal::TWO;
    MonthlySheet {
        period,
        rows,
        global_income,
        global_expense,
        global_net,
        settlement: Settlement {
            my_cash,
            sister_cash,
            target_share,
            my_difference: my_cash - target_share,
        },
    }
}
