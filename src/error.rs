// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors raised at the collection and descriptor boundary.
//!
//! The query stages themselves are total and never return these: an unknown
//! field or a nonsense page degrades to "no effect". Only loading records,
//! validating their schema, and parsing textual filters can fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("record {index} has fields [{found}], expected [{expected}]")]
    SchemaMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("expected a JSON array of records")]
    NotAnArray,

    #[error("invalid filter '{expr}': {reason}")]
    InvalidFilter { expr: String, reason: String },

    #[error("invalid sort '{0}': expected KEY, KEY:asc or KEY:desc")]
    InvalidSort(String),

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("unknown entity '{0}': expected drivers, aspirants or complaints")]
    UnknownEntity(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
