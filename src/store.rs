// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::Result;
use crate::models::AppState;

const STATE_KEY: &str = "state";

/// Loads and saves the full state document.
pub trait SnapshotStore {
    /// The last saved snapshot, normalized; an empty store yields the
    /// initial state.
    fn load(&self) -> Result<AppState>;
    fn save(&self, state: &AppState) -> Result<()>;
}

/// Snapshot store backed by the local SQLite database.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn updated_at(&self) -> Result<Option<String>> {
        let v = self
            .conn
            .query_row(
                "SELECT updated_at FROM snapshots WHERE key=?1",
                params![STATE_KEY],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }
}

impl SnapshotStore for LocalStore {
    fn load(&self) -> Result<AppState> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM snapshots WHERE key=?1",
                params![STATE_KEY],
                |r| r.get(0),
            )
            .optional()?;
        let state = match body {
            Some(b) => serde_json::from_str::<AppState>(&b)?.normalize(),
            None => AppState::default(),
        };
        Ok(state)
    }

    fn save(&self, state: &AppState) -> Result<()> {
        let body = serde_json::to_string(state)?;
        self.conn.execute(
            "INSERT INTO snapshots(key, body, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET body=excluded.body, updated_at=excluded.updated_at",
            params![STATE_KEY, body],
        )?;
        Ok(())
    }
}
