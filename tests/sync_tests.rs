// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rentsheet::db;
use rentsheet::errors::{Result, SheetError};
use rentsheet::models::AppState;
use rentsheet::remote::{RemoteDocument, subscribe};
use rentsheet::shell::{NewProperty, Shell};
use rentsheet::store::{LocalStore, SnapshotStore};
use rust_decimal::Decimal;

#[derive(Default)]
struct MemoryDocument {
    doc: Mutex<Option<AppState>>,
    offline: bool,
}

impl RemoteDocument for MemoryDocument {
    fn pull(&self) -> Result<Option<AppState>> {
        if self.offline {
            return Err(SheetError::Validation("offline".into()));
        }
        Ok(self.doc.lock().unwrap().clone())
    }

    fn push(&self, state: &AppState) -> Result<()> {
        if self.offline {
            return Err(SheetError::Validation("offline".into()));
        }
        *self.doc.lock().unwrap() = Some(state.clone());
        Ok(())
    }
}

fn flat(name: &str) -> NewProperty {
    NewProperty {
        name: name.into(),
        address: String::new(),
        tenant_name: String::new(),
        rent_amount: Decimal::from(500),
        due_day: 1,
    }
}

fn shell_with(remote: Arc<MemoryDocument>) -> Shell<LocalStore> {
    Shell::open(LocalStore::new(db::open_in_memory().unwrap()))
        .unwrap()
        .with_remote(remote)
}

#[test]
fn mutations_are_mirrored_to_the_remote() {
    let remote = Arc::new(MemoryDocument::default());
    let mut shell = shell_with(Arc::clone(&remote));
    shell.add_property(flat("Loft")).unwrap();
    let mirrored = remote.doc.lock().unwrap().clone().unwrap();
    assert_eq!(&mirrored, shell.state());
}

#[test]
fn offline_remote_does_not_block_local_changes() {
    let remote = Arc::new(MemoryDocument {
        offline: true,
        ..Default::default()
    });
    let mut shell = shell_with(remote);
    shell.add_property(flat("Loft")).unwrap();
    assert_eq!(shell.state().properties.len(), 2);
    assert_eq!(&shell.store().load().unwrap(), shell.state());
    assert!(shell.push().is_err());
    assert!(shell.pull().is_err());
}

#[test]
fn pull_replaces_local_state_when_remote_has_a_snapshot() {
    let remote = Arc::new(MemoryDocument::default());
    let mut shell = shell_with(Arc::clone(&remote));
    assert!(!shell.pull().unwrap());

    let mut other = shell_with(Arc::clone(&remote));
    other.add_property(flat("Casa")).unwrap();

    assert!(shell.pull().unwrap());
    assert!(shell.find_property("casa").is_ok());
    assert_eq!(&shell.store().load().unwrap(), shell.state());
}

#[test]
fn push_without_remote_is_an_error() {
    let shell = Shell::open(LocalStore::new(db::open_in_memory().unwrap())).unwrap();
    assert!(shell.push().is_err());
}

#[test]
fn subscription_delivers_changed_snapshots() {
    let remote = Arc::new(MemoryDocument::default());
    let (tx, rx) = mpsc::channel();
    let sub = subscribe(
        Arc::clone(&remote) as Arc<dyn RemoteDocument>,
        Duration::from_millis(10),
        move |state| {
            let _ = tx.send(state);
        },
    );

    let mut writer = shell_with(Arc::clone(&remote));
    writer.add_property(flat("Loft")).unwrap();
    let seen = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(seen.properties.len(), 2);

    let mut local = Shell::open(LocalStore::new(db::open_in_memory().unwrap())).unwrap();
    local.apply_remote(seen);
    assert!(local.find_property("loft").is_ok());

    sub.unsubscribe();
}

#[test]
fn no_callbacks_after_unsubscribe() {
    let remote = Arc::new(MemoryDocument::default());
    let (tx, rx) = mpsc::channel();
    let sub = subscribe(
        Arc::clone(&remote) as Arc<dyn RemoteDocument>,
        Duration::from_millis(10),
        move |state| {
            let _ = tx.send(state);
        },
    );
    sub.unsubscribe();

    let mut writer = shell_with(Arc::clone(&remote));
    writer.add_property(flat("Loft")).unwrap();
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}
