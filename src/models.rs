// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{Result, SheetError};

pub const COMMON_PROPERTY_ID: &str = "common-shared-expenses";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

/// Which of the two people physically handled the cash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Agent {
    #[default]
    Me,
    Sister,
}

impl Agent {
    pub fn label(self) -> &'static str {
        match self {
            Agent::Me => "Me",
            Agent::Sister => "Sister",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    Repair,
    Tax,
    ExtraHoa,
    Maintenance,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseCategory::Repair => "REPAIR",
            ExpenseCategory::Tax => "TAX",
            ExpenseCategory::ExtraHoa => "EXTRA_HOA",
            ExpenseCategory::Maintenance => "MAINTENANCE",
            ExpenseCategory::Other => "OTHER",
        }
    }
}

/// Recurring obligations tracked per property and period. Keys keep the
/// labels used by existing snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "Luz")]
    Light,
    #[serde(rename = "Gas")]
    Gas,
    #[serde(rename = "Agua")]
    Water,
    #[serde(rename = "ABL")]
    Abl,
    #[serde(rename = "Rentas")]
    Rentas,
    #[serde(rename = "Exp. Extra")]
    ExpensasExtra,
}

impl ServiceType {
    pub const UTILITIES: [ServiceType; 4] = [
        ServiceType::Light,
        ServiceType::Gas,
        ServiceType::Water,
        ServiceType::Abl,
    ];
    pub const COMMON: [ServiceType; 2] = [ServiceType::Rentas, ServiceType::ExpensasExtra];

    /// The checklist shown for a property; the common property tracks taxes
    /// and extraordinary fees instead of utilities.
    pub fn checklist(property: &Property) -> &'static [ServiceType] {
        if property.is_common {
            &Self::COMMON
        } else {
            &Self::UTILITIES
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceType::Light => "Luz",
            ServiceType::Gas => "Gas",
            ServiceType::Water => "Agua",
            ServiceType::Abl => "ABL",
            ServiceType::Rentas => "Rentas",
            ServiceType::ExpensasExtra => "Exp. Extra",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::UTILITIES
            .iter()
            .chain(Self::COMMON.iter())
            .copied()
            .find(|s| s.label() == label)
    }
}

/// Reads a service map, dropping keys that name no known service. Older
/// snapshots carry entries such as `"undefined"`.
fn known_services<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<ServiceType, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, paid)| ServiceType::from_label(&key).map(|s| (s, paid)))
        .collect())
}

/// A calendar month used for sheet placement. `month` is zero-based; field
/// order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if month > 11 {
            return Err(SheetError::Validation(format!(
                "month index {} out of range 0-11",
                month
            )));
        }
        Ok(Self { month, year })
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            month: date.month0(),
            year: date.year(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month0() == self.month && date.year() == self.year
    }

    pub fn prev(self) -> Self {
        if self.month == 0 {
            Self { month: 11, year: self.year - 1 }
        } else {
            Self { month: self.month - 1, year: self.year }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 11 {
            Self { month: 0, year: self.year + 1 }
        } else {
            Self { month: self.month + 1, year: self.year }
        }
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize]
    }

    /// First and last calendar day of the month.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        let first = NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
            .unwrap_or(NaiveDate::MIN);
        let next = self.next();
        let last = NaiveDate::from_ymd_opt(next.year, next.month + 1, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        (first, last)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month + 1, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tenant_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rent_amount: Decimal,
    pub due_day: u32,
    #[serde(default)]
    pub is_common: bool,
}

impl Property {
    pub fn common() -> Self {
        Self {
            id: COMMON_PROPERTY_ID.to_string(),
            name: "VARIOS / GASTOS COMUNES".to_string(),
            address: "Compartido".to_string(),
            tenant_name: "N/A".to_string(),
            rent_amount: Decimal::ZERO,
            due_day: 1,
            is_common: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub property_id: String,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ExpenseCategory>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent_year: Option<i32>,
    #[serde(default)]
    pub handled_by: Agent,
}

impl Transaction {
    /// The accounting period, when both halves are recorded.
    pub fn period(&self) -> Option<Period> {
        match (self.rent_month, self.rent_year) {
            (Some(month), Some(year)) => Some(Period { month, year }),
            _ => None,
        }
    }

    pub fn set_period(&mut self, period: Option<Period>) {
        self.rent_month = period.map(|p| p.month);
        self.rent_year = period.map(|p| p.year);
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: String,
    pub property_id: String,
    pub month: u32,
    pub year: i32,
    #[serde(default, deserialize_with = "known_services")]
    pub services: BTreeMap<ServiceType, bool>,
}

impl ServiceRecord {
    pub fn is_for(&self, property_id: &str, period: Period) -> bool {
        self.property_id == property_id && self.month == period.month && self.year == period.year
    }

    pub fn is_paid(&self, service: ServiceType) -> bool {
        self.services.get(&service).copied().unwrap_or(false)
    }
}

/// The whole dataset, persisted and synchronized as one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub properties: Vec<Property>,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub service_records: Vec<ServiceRecord>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            properties: vec![Property::common()],
            transactions: Vec::new(),
            service_records: Vec::new(),
        }
    }
}

impl AppState {
    /// Fills the defaults every engine relies on: the common property exists
    /// and categories only appear on expenses.
    pub fn normalize(mut self) -> Self {
        let mut has_common = false;
        for p in &mut self.properties {
            if p.id == COMMON_PROPERTY_ID {
                p.is_common = true;
            }
            has_common |= p.is_common;
        }
        if !has_common {
            self.properties.push(Property::common());
        }
        for t in &mut self.transactions {
            match t.kind {
                TransactionType::Income => t.category = None,
                TransactionType::Expense => {
                    t.category.get_or_insert(ExpenseCategory::Other);
                }
            }
        }
        self
    }

    pub fn property(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    pub fn service_record(&self, property_id: &str, period: Period) -> Option<&ServiceRecord> {
        self.service_records
            .iter()
            .find(|r| r.is_for(property_id, period))
    }

    /// Properties in sheet order: regular ones keep their order, the common
    /// property goes last.
    pub fn sheet_properties(&self) -> Vec<&Property> {
        let mut sorted: Vec<&Property> = self.properties.iter().collect();
        sorted.sort_by_key(|p| p.is_common);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_map_skips_unknown_keys() {
        let record: ServiceRecord = serde_json::from_str(
            r#"{"id":"s","propertyId":"p","month":1,"year":2024,
                "services":{"Rentas":true,"Exp. Extra":false,"undefined":true}}"#,
        )
        .unwrap();
        assert_eq!(record.services.len(), 2);
        assert!(record.is_paid(ServiceType::Rentas));
        assert!(!record.is_paid(ServiceType::ExpensasExtra));
        assert_eq!(ServiceType::from_label("Luz"), Some(ServiceType::Light));
        assert_eq!(ServiceType::from_label("undefined"), None);
    }

    #[test]
    fn period_navigation_wraps_year() {
        let jan = Period::new(0, 2024).unwrap();
        assert_eq!(jan.prev(), Period { month: 11, year: 2023 });
        assert_eq!(jan.prev().next(), jan);
        assert!(Period::new(12, 2024).is_err());
    }

    #[test]
    fn period_bounds_cover_leap_february() {
        let feb = Period::new(1, 2024).unwrap();
        let (first, last) = feb.bounds();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn normalize_synthesizes_common_property_once() {
        let state = AppState {
            properties: vec![],
            transactions: vec![],
            service_records: vec![],
        }
        .normalize();
        assert_eq!(state.properties.len(), 1);
        assert!(state.properties[0].is_common);
        let again = state.clone().normalize();
        assert_eq!(again, state);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let raw = r#"{
            "properties": [{"id":"1","name":"Depto","rentAmount":150000,"dueDay":5}],
            "transactions": [
                {"id":"t1","propertyId":"1","date":"2024-04-03","amount":50000,"type":"EXPENSE","description":""}
            ]
        }"#;
        let state: AppState = serde_json::from_str(raw).unwrap();
        let state = state.normalize();
        let tx = &state.transactions[0];
        assert_eq!(tx.handled_by, Agent::Me);
        assert_eq!(tx.category, Some(ExpenseCategory::Other));
        assert_eq!(tx.period(), None);
        assert!(state.service_records.is_empty());
        assert_eq!(state.properties.last().unwrap().id, COMMON_PROPERTY_ID);
    }

    #[test]
    fn sheet_order_puts_common_last() {
        let mut state = AppState::default();
        state.properties.push(Property {
            id: "a".into(),
            name: "A".into(),
            address: String::new(),
            tenant_name: String::new(),
            rent_amount: Decimal::from(10),
            due_day: 1,
            is_common: false,
        });
        let order: Vec<&str> = state.sheet_properties().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["a", COMMON_PROPERTY_ID]);
    }
}
