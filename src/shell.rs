// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Owns the in-memory state and applies user actions to it. Every mutation
//! lands in memory first and is then mirrored to the local store and the
//! remote document; mirror failures are logged, never rolled back.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::{Result, SheetError};
use crate::export;
use crate::models::{
    Agent, AppState, ExpenseCategory, Period, Property, ServiceRecord, ServiceType, Transaction,
    TransactionType,
};
use crate::remote::RemoteDocument;
use crate::store::SnapshotStore;
use crate::utils::new_id;

/// Fields of a transaction before it receives an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub property_id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: TransactionType,
    pub category: Option<ExpenseCategory>,
    pub description: String,
    pub period: Option<Period>,
    pub handled_by: Agent,
}

/// Fields of a property before it receives an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub name: String,
    pub address: String,
    pub tenant_name: String,
    pub rent_amount: Decimal,
    pub due_day: u32,
}

pub struct Shell<S: SnapshotStore> {
    state: AppState,
    store: S,
    remote: Option<Arc<dyn RemoteDocument>>,
}

impl<S: SnapshotStore> Shell<S> {
    pub fn open(store: S) -> Result<Self> {
        let state = store.load()?;
        Ok(Self {
            state,
            store,
            remote: None,
        })
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteDocument>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn remote(&self) -> Option<&Arc<dyn RemoteDocument>> {
        self.remote.as_ref()
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state) {
            tracing::error!(error = %e, "failed to save local snapshot");
        }
        self.push_remote();
    }

    fn push_remote(&self) {
        if let Some(remote) = &self.remote {
            if let Err(e) = remote.push(&self.state) {
                tracing::warn!(error = %e, "failed to mirror snapshot to remote; keeping local state");
            }
        }
    }

    /// Looks a property up by id, then by case-insensitive name.
    pub fn find_property(&self, key: &str) -> Result<&Property> {
        let key = key.trim();
        self.state
            .property(key)
            .or_else(|| {
                self.state
                    .properties
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(key))
            })
            .ok_or_else(|| SheetError::NotFound(format!("property '{}'", key)))
    }

    pub fn transaction(&self, id: &str) -> Result<&Transaction> {
        self.state
            .transactions
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| SheetError::NotFound(format!("transaction '{}'", id)))
    }

    /// Pre-filled form values for a new entry on the sheet of `period`.
    pub fn draft_transaction(
        &self,
        property_id: &str,
        kind: TransactionType,
        period: Period,
        today: NaiveDate,
    ) -> Result<NewTransaction> {
        let property = self.find_property(property_id)?;
        let draft = match kind {
            TransactionType::Income => NewTransaction {
                property_id: property.id.clone(),
                date: today,
                amount: property.rent_amount,
                kind,
                category: None,
                description: if property.is_common {
                    "Miscellaneous income".to_string()
                } else {
                    format!("Rent {}", period.month_name())
                },
                period: Some(period),
                handled_by: Agent::Me,
            },
            TransactionType::Expense => NewTransaction {
                property_id: property.id.clone(),
                date: today,
                amount: Decimal::ZERO,
                kind,
                category: Some(ExpenseCategory::Maintenance),
                description: String::new(),
                period: Some(period),
                handled_by: Agent::Me,
            },
        };
        Ok(draft)
    }

    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<&Transaction> {
        let mut tx = Transaction {
            id: new_id(),
            property_id: new.property_id,
            date: new.date,
            amount: new.amount,
            kind: new.kind,
            category: new.category,
            description: new.description,
            rent_month: None,
            rent_year: None,
            handled_by: new.handled_by,
        };
        tx.set_period(new.period);
        self.check_transaction(&mut tx)?;
        tracing::info!(id = %tx.id, property = %tx.property_id, "transaction added");
        self.state.transactions.insert(0, tx);
        self.persist();
        Ok(&self.state.transactions[0])
    }

    /// Applies `edit` to a copy of the transaction and stores it when it is
    /// still valid.
    pub fn update_transaction<F>(&mut self, id: &str, edit: F) -> Result<&Transaction>
    where
        F: FnOnce(&mut Transaction),
    {
        let idx = self
            .state
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| SheetError::NotFound(format!("transaction '{}'", id)))?;
        let mut tx = self.state.transactions[idx].clone();
        edit(&mut tx);
        tx.id = id.to_string();
        self.check_transaction(&mut tx)?;
        self.state.transactions[idx] = tx;
        self.persist();
        Ok(&self.state.transactions[idx])
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction> {
        let idx = self
            .state
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| SheetError::NotFound(format!("transaction '{}'", id)))?;
        let removed = self.state.transactions.remove(idx);
        self.persist();
        Ok(removed)
    }

    fn check_transaction(&self, tx: &mut Transaction) -> Result<()> {
        let property = self
            .state
            .property(&tx.property_id)
            .ok_or_else(|| SheetError::Validation(format!("unknown property '{}'", tx.property_id)))?;
        if tx.amount < Decimal::ZERO {
            return Err(SheetError::Validation("amount must not be negative".into()));
        }
        if tx.rent_month.is_some() != tx.rent_year.is_some() {
            return Err(SheetError::Validation(
                "rent month and rent year must be given together".into(),
            ));
        }
        if let Some(p) = tx.period() {
            Period::new(p.month, p.year)?;
        }
        match tx.kind {
            TransactionType::Income => tx.category = None,
            TransactionType::Expense => {
                tx.category.get_or_insert(ExpenseCategory::Other);
            }
        }
        if let (TransactionType::Income, Some(period)) = (tx.kind, tx.period()) {
            let clash = self.state.transactions.iter().any(|t| {
                t.id != tx.id
                    && t.is_income()
                    && t.property_id == tx.property_id
                    && t.period() == Some(period)
            });
            if clash {
                return Err(SheetError::DuplicateIncome {
                    property: property.name.clone(),
                    period: period.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn add_property(&mut self, new: NewProperty) -> Result<&Property> {
        let property = Property {
            id: new_id(),
            name: new.name.trim().to_string(),
            address: new.address,
            tenant_name: new.tenant_name,
            rent_amount: new.rent_amount,
            due_day: new.due_day,
            is_common: false,
        };
        check_property(&property)?;
        self.state.properties.push(property);
        self.persist();
        Ok(&self.state.properties[self.state.properties.len() - 1])
    }

    pub fn update_property<F>(&mut self, id: &str, edit: F) -> Result<&Property>
    where
        F: FnOnce(&mut Property),
    {
        let idx = self
            .state
            .properties
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| SheetError::NotFound(format!("property '{}'", id)))?;
        let mut property = self.state.properties[idx].clone();
        edit(&mut property);
        property.id = id.to_string();
        property.is_common = self.state.properties[idx].is_common;
        check_property(&property)?;
        self.state.properties[idx] = property;
        self.persist();
        Ok(&self.state.properties[idx])
    }

    /// Flips one service flag for a property and period, creating the
    /// record on first use. Returns the new flag value.
    pub fn toggle_service(
        &mut self,
        property_id: &str,
        period: Period,
        service: ServiceType,
    ) -> Result<bool> {
        let property = self.find_property(property_id)?;
        if !ServiceType::checklist(property).contains(&service) {
            return Err(SheetError::Validation(format!(
                "service '{}' is not tracked for '{}'",
                service.label(),
                property.name
            )));
        }
        let checklist = ServiceType::checklist(property);
        let property_id = property.id.clone();
        let existing = self
            .state
            .service_records
            .iter()
            .position(|r| r.is_for(&property_id, period));
        let paid = match existing {
            Some(idx) => {
                let flag = self.state.service_records[idx]
                    .services
                    .entry(service)
                    .or_insert(false);
                *flag = !*flag;
                *flag
            }
            None => {
                let mut services: BTreeMap<ServiceType, bool> =
                    checklist.iter().map(|s| (*s, false)).collect();
                services.insert(service, true);
                self.state.service_records.push(ServiceRecord {
                    id: new_id(),
                    property_id,
                    month: period.month,
                    year: period.year,
                    services,
                });
                true
            }
        };
        self.persist();
        Ok(paid)
    }

    /// Replaces the whole state with a backup; the current state is kept when
    /// the file does not parse.
    pub fn import_backup(&mut self, bytes: &[u8]) -> Result<()> {
        let state = export::import_full(bytes)?;
        self.state = state;
        self.persist();
        Ok(())
    }

    /// Adopts a snapshot that arrived from the remote document.
    pub fn apply_remote(&mut self, state: AppState) {
        self.state = state.normalize();
        if let Err(e) = self.store.save(&self.state) {
            tracing::error!(error = %e, "failed to save remote snapshot locally");
        }
    }

    /// Mirrors the current state to the remote document, reporting failure.
    pub fn push(&self) -> Result<()> {
        match &self.remote {
            Some(remote) => remote.push(&self.state),
            None => Err(SheetError::Validation("no remote document configured".into())),
        }
    }

    /// Replaces local state with the remote snapshot if one exists.
    pub fn pull(&mut self) -> Result<bool> {
        let remote = match &self.remote {
            Some(remote) => Arc::clone(remote),
            None => return Err(SheetError::Validation("no remote document configured".into())),
        };
        match remote.pull()? {
            Some(state) => {
                self.apply_remote(state);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn check_property(p: &Property) -> Result<()> {
    if p.name.trim().is_empty() {
        return Err(SheetError::Validation("property name is required".into()));
    }
    if p.rent_amount < Decimal::ZERO {
        return Err(SheetError::Validation("rent amount must not be negative".into()));
    }
    if !(1..=31).contains(&p.due_day) {
        return Err(SheetError::Validation("due day must be between 1 and 31".into()));
    }
    Ok(())
}
