// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Shared remote copy of the state document. Writes replace the whole
//! document; the last writer wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::errors::Result;
use crate::models::AppState;

pub trait RemoteDocument: Send + Sync {
    /// The current remote snapshot, or `None` before the first write.
    fn pull(&self) -> Result<Option<AppState>>;
    fn push(&self, state: &AppState) -> Result<()>;
}

/// A JSON document at a fixed URL: `GET` reads it, `PUT` replaces it.
pub struct HttpDocument {
    client: Client,
    url: String,
}

impl HttpDocument {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RemoteDocument for HttpDocument {
    fn pull(&self) -> Result<Option<AppState>> {
        let resp = self.client.get(&self.url).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            tracing::info!(url = %self.url, "remote document does not exist yet");
            return Ok(None);
        }
        let state: AppState = resp.error_for_status()?.json()?;
        Ok(Some(state.normalize()))
    }

    fn push(&self, state: &AppState) -> Result<()> {
        self.client
            .put(&self.url)
            .json(state)
            .send()?
            .error_for_status()?;
        tracing::debug!(url = %self.url, "remote document replaced");
        Ok(())
    }
}

/// Handle for a polling subscription; stops the poller when dropped.
pub struct Subscription {
    stop: Arc<AtomicBool>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}

/// Polls `remote` every `interval` and hands each changed snapshot to
/// `callback`. Poll failures are logged and retried on the next tick. No
/// callback runs once the returned `Subscription` is dropped.
pub fn subscribe<F>(remote: Arc<dyn RemoteDocument>, interval: Duration, mut callback: F) -> Subscription
where
    F: FnMut(AppState) + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    thread::spawn(move || {
        let mut last: Option<AppState> = None;
        while !flag.load(Ordering::Acquire) {
            match remote.pull() {
                Ok(Some(state)) if last.as_ref() != Some(&state) => {
                    // unsubscribed while the pull was in flight
                    if flag.load(Ordering::Acquire) {
                        break;
                    }
                    last = Some(state.clone());
                    callback(state);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "remote poll failed"),
            }
            thread::sleep(interval);
        }
    });
    Subscription { stop }
}
