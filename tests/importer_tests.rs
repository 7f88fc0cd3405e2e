// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rentsheet::models::{COMMON_PROPERTY_ID, ExpenseCategory, Period, ServiceType};
use rentsheet::shell::Shell;
use rentsheet::store::{LocalStore, SnapshotStore};
use rentsheet::{cli, commands::importer, db};
use std::io::Write;
use tempfile::NamedTempFile;

fn shell() -> Shell<LocalStore> {
    Shell::open(LocalStore::new(db::open_in_memory().unwrap())).unwrap()
}

fn import(shell: &mut Shell<LocalStore>, body: &str) -> anyhow::Result<()> {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(body.as_bytes()).unwrap();
    let path = f.path().to_str().unwrap().to_string();
    let matches =
        cli::build_cli().get_matches_from(["rentsheet", "import", "backup", "--path", &path]);
    let Some(("import", m)) = matches.subcommand() else { panic!("no import subcommand") };
    importer::handle(shell, m)
}

const BACKUP: &str = r#"{
  "properties": [
    {"id": "p1", "name": "Depto Sur", "address": "", "tenantName": "Leo",
     "rentAmount": 90000, "dueDay": 10, "isCommon": false}
  ],
  "transactions": [
    {"id": "t1", "propertyId": "p1", "date": "2024-03-11", "amount": 90000,
     "type": "INCOME", "category": "TAX", "description": "Rent March",
     "rentMonth": 2, "rentYear": 2024, "handledBy": "ME"},
    {"id": "t2", "propertyId": "p1", "date": "2024-03-12", "amount": 1500,
     "type": "EXPENSE", "description": "", "handledBy": "SISTER"}
  ]
}"#;

#[test]
fn valid_backup_replaces_state_and_is_normalized() {
    let mut shell = shell();
    import(&mut shell, BACKUP).unwrap();
    let state = shell.state();
    assert_eq!(state.transactions.len(), 2);
    assert!(state.service_records.is_empty());
    // the shared-expenses property is synthesized when the backup lacks it
    assert!(state.property(COMMON_PROPERTY_ID).is_some());
    assert_eq!(state.transactions[0].category, None);
    assert_eq!(state.transactions[1].category, Some(ExpenseCategory::Other));
    // the local snapshot follows
    assert_eq!(&shell.store().load().unwrap(), shell.state());
}

#[test]
fn invalid_backup_leaves_state_untouched() {
    let mut shell = shell();
    import(&mut shell, BACKUP).unwrap();
    let before = shell.state().clone();
    assert!(import(&mut shell, r#"{"properties": []}"#).is_err());
    assert!(import(&mut shell, "not json at all").is_err());
    assert_eq!(shell.state(), &before);
}

#[test]
fn backup_with_unlabelled_service_keys_still_imports() {
    let mut shell = shell();
    let body = r#"{
      "properties": [
        {"id": "common-shared-expenses", "name": "VARIOS / GASTOS COMUNES",
         "address": "Compartido", "tenantName": "N/A", "rentAmount": 0,
         "dueDay": 1, "isCommon": true}
      ],
      "transactions": [],
      "serviceRecords": [
        {"id": "s1", "propertyId": "common-shared-expenses", "month": 4, "year": 2024,
         "services": {"Rentas": false, "Exp. Extra": false, "undefined": true}}
      ]
    }"#;
    import(&mut shell, body).unwrap();
    let may = Period::new(4, 2024).unwrap();
    let record = shell.state().service_record(COMMON_PROPERTY_ID, may).unwrap();
    assert_eq!(record.services.len(), 2);
    assert!(!record.is_paid(ServiceType::Rentas));
    assert!(shell.toggle_service(COMMON_PROPERTY_ID, may, ServiceType::Rentas).unwrap());
}
