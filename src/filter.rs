// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structured filters, independent of free-text search.
//!
//! Filters AND together; a `MultiSelect` ORs across its own values. An empty
//! constraint (no values, no bounds, blank term) is a no-op rather than "match
//! nothing": that is how "no filter selected" is expressed without a separate
//! flag.
//!
//! A record that lacks the filtered field never satisfies an active filter.
//!
//! # Textual syntax
//!
//! `FieldFilter` parses from the compact form the CLI accepts:
//!
//! | Expression                  | Filter                              |
//! |-----------------------------|-------------------------------------|
//! | `status=Habilitado`         | `ExactMatch`                        |
//! | `status:in=Nueva,Resuelta`  | `MultiSelect`                       |
//! | `fecha:from=2024-01-10`     | `DateRange` with a lower bound      |
//! | `fecha:to=2024-01-31`       | `DateRange` with an upper bound     |
//! | `id:contains=qa-10`         | `TextContains`                      |

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::types::{Record, Value};

/// One field-level predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldFilter {
    /// Field equals the value.
    ExactMatch { field: String, value: Value },
    /// Field equals any of the values. Empty set constrains nothing.
    MultiSelect {
        field: String,
        #[serde(default)]
        values: Vec<Value>,
    },
    /// Field's instant lies within `[from 00:00, to 23:59:59.999999999]`, in
    /// local time. Either bound may be open.
    DateRange {
        field: String,
        #[serde(default)]
        from: Option<NaiveDate>,
        #[serde(default)]
        to: Option<NaiveDate>,
    },
    /// Field's text contains the term, ignoring case. Blank term constrains
    /// nothing.
    TextContains { field: String, term: String },
}

impl FieldFilter {
    pub fn exact(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FieldFilter::ExactMatch {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn one_of<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        FieldFilter::MultiSelect {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn date_range(field: impl Into<String>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        FieldFilter::DateRange {
            field: field.into(),
            from,
            to,
        }
    }

    pub fn contains(field: impl Into<String>, term: impl Into<String>) -> Self {
        FieldFilter::TextContains {
            field: field.into(),
            term: term.into(),
        }
    }

    /// The field this filter constrains.
    pub fn field(&self) -> &str {
        match self {
            FieldFilter::ExactMatch { field, .. }
            | FieldFilter::MultiSelect { field, .. }
            | FieldFilter::DateRange { field, .. }
            | FieldFilter::TextContains { field, .. } => field,
        }
    }

    /// Does this filter exclude anything at all?
    pub fn is_active(&self) -> bool {
        match self {
            FieldFilter::ExactMatch { .. } => true,
            FieldFilter::MultiSelect { values, .. } => !values.is_empty(),
            FieldFilter::DateRange { from, to, .. } => from.is_some() || to.is_some(),
            FieldFilter::TextContains { term, .. } => !term.trim().is_empty(),
        }
    }

    /// Evaluate against one record.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(actual) = record.field(self.field()) else {
            return false;
        };

        match self {
            FieldFilter::ExactMatch { value, .. } => loosely_equal(&actual, value),
            FieldFilter::MultiSelect { values, .. } => {
                values.iter().any(|v| loosely_equal(&actual, v))
            }
            FieldFilter::DateRange { from, to, .. } => {
                let Some(instant) = actual.as_datetime() else {
                    return false;
                };
                from.map_or(true, |d| instant >= day_start(d))
                    && to.map_or(true, |d| instant <= day_end(d))
            }
            FieldFilter::TextContains { term, .. } => actual
                .display()
                .to_lowercase()
                .contains(&term.trim().to_lowercase()),
        }
    }
}

/// Same-variant values compare structurally; mixed variants compare by their
/// display text, so `"5"` selects a numeric `5`.
fn loosely_equal(actual: &Value, expected: &Value) -> bool {
    if std::mem::discriminant(actual) == std::mem::discriminant(expected) {
        actual == expected
    } else {
        actual.display() == expected.display()
    }
}

/// Local day start.
pub fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable instant of the local day.
pub fn day_end(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or_else(|| day_start(date))
}

/// Keep the records that pass every filter, in input order.
pub fn apply_filters<'a, R: Record>(records: &'a [R], filters: &[FieldFilter]) -> Vec<&'a R> {
    let active: Vec<&FieldFilter> = filters.iter().filter(|f| f.is_active()).collect();
    let kept: Vec<&R> = records
        .iter()
        .filter(|record| active.iter().all(|f| f.matches(*record)))
        .collect();
    debug!(
        "filter stage: {} active filters kept {} of {} records",
        active.len(),
        kept.len(),
        records.len()
    );
    kept
}

/// Count of filters that actually constrain the result.
pub fn active_count(filters: &[FieldFilter]) -> usize {
    filters.iter().filter(|f| f.is_active()).count()
}

impl FromStr for FieldFilter {
    type Err = QueryError;

    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| QueryError::InvalidFilter {
            expr: expr.to_string(),
            reason: reason.to_string(),
        };

        let (lhs, value) = expr
            .split_once('=')
            .ok_or_else(|| invalid("missing '='"))?;
        let (field, op) = match lhs.split_once(':') {
            Some((field, op)) => (field.trim(), Some(op.trim())),
            None => (lhs.trim(), None),
        };
        if field.is_empty() {
            return Err(invalid("missing field name"));
        }

        match op {
            None => Ok(FieldFilter::exact(field, value)),
            Some("in") => Ok(FieldFilter::one_of(
                field,
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string),
            )),
            Some("from") => Ok(FieldFilter::date_range(field, Some(parse_date(value)?), None)),
            Some("to") => Ok(FieldFilter::date_range(field, None, Some(parse_date(value)?))),
            Some("contains") => Ok(FieldFilter::contains(field, value)),
            Some(other) => Err(invalid(&format!(
                "unknown operator '{}', expected in, from, to or contains",
                other
            ))),
        }
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| QueryError::InvalidDate(s.to_string()))
}
