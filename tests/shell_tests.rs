// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rentsheet::commands::doctor;
use rentsheet::db;
use rentsheet::errors::SheetError;
use rentsheet::models::{
    AppState, COMMON_PROPERTY_ID, Period, ServiceType, Transaction, TransactionType,
};
use rentsheet::shell::{NewProperty, Shell};
use rentsheet::store::{LocalStore, SnapshotStore};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn shell() -> Shell<LocalStore> {
    Shell::open(LocalStore::new(db::open_in_memory().unwrap())).unwrap()
}

fn flat(name: &str) -> NewProperty {
    NewProperty {
        name: name.into(),
        address: String::new(),
        tenant_name: String::new(),
        rent_amount: Decimal::from(1000),
        due_day: 10,
    }
}

#[test]
fn fresh_store_starts_with_common_property() {
    let shell = shell();
    let state = shell.state();
    assert_eq!(state.properties.len(), 1);
    assert_eq!(state.properties[0].id, COMMON_PROPERTY_ID);
    assert!(state.transactions.is_empty());
    assert!(shell.store().updated_at().unwrap().is_none());
}

#[test]
fn state_survives_reopening_the_database() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rentsheet.sqlite");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        db::init_schema(&conn).unwrap();
        let mut shell = Shell::open(LocalStore::new(conn)).unwrap();
        shell.add_property(flat("Loft")).unwrap();
        assert!(shell.store().updated_at().unwrap().is_some());
    }
    let conn = rusqlite::Connection::open(&path).unwrap();
    let shell = Shell::open(LocalStore::new(conn)).unwrap();
    assert!(shell.find_property("loft").is_ok());
}

#[test]
fn corrupt_snapshot_is_a_load_error() {
    let conn = db::open_in_memory().unwrap();
    conn.execute(
        "INSERT INTO snapshots(key, body, updated_at) VALUES ('state', '{oops', datetime('now'))",
        [],
    )
    .unwrap();
    assert!(Shell::open(LocalStore::new(conn)).is_err());
}

#[test]
fn toggle_creates_record_then_flips() {
    let mut shell = shell();
    let pid = shell.add_property(flat("Loft")).unwrap().id.clone();
    let may = Period::new(4, 2024).unwrap();

    assert!(shell.toggle_service(&pid, may, ServiceType::Gas).unwrap());
    let record = shell.state().service_record(&pid, may).unwrap();
    assert_eq!(record.services.len(), 4);
    assert!(record.is_paid(ServiceType::Gas));
    assert!(!record.is_paid(ServiceType::Light));

    assert!(!shell.toggle_service(&pid, may, ServiceType::Gas).unwrap());
    assert!(shell.toggle_service(&pid, may, ServiceType::Water).unwrap());
    assert_eq!(shell.state().service_records.len(), 1);
}

#[test]
fn common_property_tracks_taxes_only() {
    let mut shell = shell();
    let may = Period::new(4, 2024).unwrap();
    assert!(
        shell
            .toggle_service(COMMON_PROPERTY_ID, may, ServiceType::Rentas)
            .unwrap()
    );
    let err = shell
        .toggle_service(COMMON_PROPERTY_ID, may, ServiceType::Light)
        .unwrap_err();
    assert!(matches!(err, SheetError::Validation(_)));
}

#[test]
fn property_edit_keeps_common_flag_and_validates() {
    let mut shell = shell();
    let pid = shell.add_property(flat("Loft")).unwrap().id.clone();
    let updated = shell
        .update_property(&pid, |p| {
            p.rent_amount = Decimal::from(1200);
            p.is_common = true;
        })
        .unwrap();
    assert_eq!(updated.rent_amount, Decimal::from(1200));
    assert!(!updated.is_common);

    assert!(shell.update_property(&pid, |p| p.due_day = 40).is_err());
    assert!(shell.add_property(flat("  ")).is_err());
    assert_eq!(shell.state().properties.len(), 2);
}

#[test]
fn draft_for_common_property_is_misc_income() {
    let shell = shell();
    let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
    let draft = shell
        .draft_transaction(
            COMMON_PROPERTY_ID,
            TransactionType::Income,
            Period::new(4, 2024).unwrap(),
            today,
        )
        .unwrap();
    assert_eq!(draft.description, "Miscellaneous income");
    assert_eq!(draft.amount, Decimal::ZERO);
    assert_eq!(draft.date, today);
}

#[test]
fn doctor_reports_duplicate_rent_from_imported_data() {
    let income = |id: &str| Transaction {
        id: id.into(),
        property_id: COMMON_PROPERTY_ID.into(),
        date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        amount: Decimal::from(10),
        kind: TransactionType::Income,
        category: None,
        description: String::new(),
        rent_month: Some(4),
        rent_year: Some(2024),
        handled_by: Default::default(),
    };
    let state = AppState {
        transactions: vec![income("a"), income("b")],
        ..AppState::default()
    };
    assert!(doctor::check(&AppState::default()).is_empty());
    let rows = doctor::check(&state);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "duplicate_income");
    assert!(rows[0][1].contains("05/2024"));

    let store = LocalStore::new(db::open_in_memory().unwrap());
    store.save(&state).unwrap();
    assert_eq!(store.load().unwrap(), state);
}
