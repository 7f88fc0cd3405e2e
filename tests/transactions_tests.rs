// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rentsheet::models::{Agent, ExpenseCategory, Period, TransactionType};
use rentsheet::shell::{NewProperty, Shell};
use rentsheet::store::LocalStore;
use rentsheet::{cli, commands::transactions, db};
use rust_decimal::Decimal;

fn setup() -> Shell<LocalStore> {
    let conn = db::open_in_memory().unwrap();
    let mut shell = Shell::open(LocalStore::new(conn)).unwrap();
    shell
        .add_property(NewProperty {
            name: "Depto Centro".into(),
            address: "Av. Corrientes 1234".into(),
            tenant_name: "Juan".into(),
            rent_amount: Decimal::from(150_000),
            due_day: 5,
        })
        .unwrap();
    shell
}

fn run(shell: &mut Shell<LocalStore>, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["rentsheet", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(shell, tx_m)
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn income_defaults_to_property_rent_and_sheet_period() {
    let mut shell = setup();
    run(
        &mut shell,
        &["add", "--property", "depto centro", "--type", "income", "--month", "2024-04", "--date", "2024-04-03"],
    )
    .unwrap();
    let tx = &shell.state().transactions[0];
    assert_eq!(tx.kind, TransactionType::Income);
    assert_eq!(tx.amount, Decimal::from(150_000));
    assert_eq!(tx.period(), Some(Period::new(3, 2024).unwrap()));
    assert_eq!(tx.description, "Rent April");
    assert_eq!(tx.handled_by, Agent::Me);
    assert_eq!(tx.category, None);
}

#[test]
fn expense_defaults_to_maintenance_and_prepends() {
    let mut shell = setup();
    run(&mut shell, &["add", "--property", "Depto Centro", "--type", "income", "--month", "2024-04"]).unwrap();
    run(
        &mut shell,
        &["add", "--property", "Depto Centro", "--type", "expense", "--month", "2024-04", "--amount", "50000", "--handler", "sister"],
    )
    .unwrap();
    let newest = &shell.state().transactions[0];
    assert_eq!(newest.kind, TransactionType::Expense);
    assert_eq!(newest.category, Some(ExpenseCategory::Maintenance));
    assert_eq!(newest.handled_by, Agent::Sister);
    assert_eq!(shell.state().transactions.len(), 2);
}

#[test]
fn second_rent_for_same_period_is_rejected() {
    let mut shell = setup();
    let args = ["add", "--property", "Depto Centro", "--type", "income", "--month", "2024-04"];
    run(&mut shell, &args).unwrap();
    assert!(run(&mut shell, &args).is_err());
    assert_eq!(shell.state().transactions.len(), 1);
}

#[test]
fn edit_can_move_and_drop_the_period() {
    let mut shell = setup();
    run(
        &mut shell,
        &["add", "--property", "Depto Centro", "--type", "expense", "--month", "2024-04", "--amount", "10", "--date", "2024-06-02"],
    )
    .unwrap();
    let id = shell.state().transactions[0].id.clone();
    run(&mut shell, &["edit", &id, "--month", "2024-05", "--category", "tax"]).unwrap();
    let tx = shell.transaction(&id).unwrap();
    assert_eq!(tx.period(), Some(Period::new(4, 2024).unwrap()));
    assert_eq!(tx.category, Some(ExpenseCategory::Tax));
    run(&mut shell, &["edit", &id, "--no-period"]).unwrap();
    assert_eq!(shell.transaction(&id).unwrap().period(), None);
    run(&mut shell, &["rm", &id]).unwrap();
    assert!(shell.state().transactions.is_empty());
}

#[test]
fn list_limit_and_month_filter() {
    let mut shell = setup();
    for m in ["2024-01", "2024-02", "2024-03"] {
        run(&mut shell, &["add", "--property", "Depto Centro", "--type", "income", "--month", m]).unwrap();
    }
    let matches = cli::build_cli().get_matches_from(["rentsheet", "tx", "list", "--limit", "2"]);
    let Some(("tx", tx_m)) = matches.subcommand() else { panic!("no tx subcommand") };
    let Some(("list", list_m)) = tx_m.subcommand() else { panic!("no list subcommand") };
    let rows = transactions::query_rows(&shell, list_m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].period, "03/2024");

    let matches = cli::build_cli().get_matches_from(["rentsheet", "tx", "list", "--month", "2024-02"]);
    let Some(("tx", tx_m)) = matches.subcommand() else { panic!("no tx subcommand") };
    let Some(("list", list_m)) = tx_m.subcommand() else { panic!("no list subcommand") };
    let rows = transactions::query_rows(&shell, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "INCOME");
    assert_eq!(rows[0].property, "Depto Centro");
}

#[test]
fn negative_amount_is_rejected() {
    let mut shell = setup();
    let err = run(
        &mut shell,
        &["add", "--property", "Depto Centro", "--type", "expense", "--amount=-5"],
    );
    assert!(err.is_err());
    assert!(shell.state().transactions.is_empty());
}
