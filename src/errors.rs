// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the rentsheet library layer.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("Remote document error: {0}")]
    Remote(#[from] reqwest::Error),
    #[error("Invalid or corrupted file: {0}")]
    InvalidFile(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Property '{property}' already has rent recorded for {period}")]
    DuplicateIncome { property: String, period: String },
}

pub type Result<T> = std::result::Result<T, SheetError>;
