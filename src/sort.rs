// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Single-key, stable, tri-state sorting.
//!
//! Clicking a column cycles ascending → descending → unsorted. Unsorted is a
//! real state, not a missing one: it hands back the filter-stage order so the
//! user can get the natural order back without reloading.
//!
//! Stability matters more than it looks. Status and date columns are full of
//! duplicates, and an unstable sort would visibly reshuffle identical rows on
//! every keystroke.
//!
//! Records missing the key sort before every present value (and therefore
//! last when descending). A key no record has leaves the order untouched.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::contracts::check_sorted;
use crate::error::QueryError;
use crate::types::{Record, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
    #[serde(rename = "none")]
    None,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
            SortDirection::None => "none",
        }
    }
}

/// Sort key plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    pub fn asc(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Descending)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.direction.as_str())
    }
}

/// `key`, `key:asc`, `key:desc` or `key:none`.
impl FromStr for SortSpec {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.rsplit_once(':') {
            Some((key, "asc")) => (key, SortDirection::Ascending),
            Some((key, "desc")) => (key, SortDirection::Descending),
            Some((key, "none")) => (key, SortDirection::None),
            Some(_) => return Err(QueryError::InvalidSort(s.to_string())),
            None => (s, SortDirection::Ascending),
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(QueryError::InvalidSort(s.to_string()));
        }
        Ok(SortSpec::new(key, direction))
    }
}

/// The tri-state column toggle.
///
/// Same key: ascending → descending → unsorted → ascending. A different key
/// always starts ascending.
pub fn cycle_sort(current: Option<&SortSpec>, clicked: &str) -> Option<SortSpec> {
    match current {
        Some(spec) if spec.key == clicked => match spec.direction {
            SortDirection::Ascending => Some(SortSpec::desc(clicked)),
            SortDirection::Descending => None,
            SortDirection::None => Some(SortSpec::asc(clicked)),
        },
        _ => Some(SortSpec::asc(clicked)),
    }
}

/// The column toggle as a value: the current sort, or none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortState(Option<SortSpec>);

impl SortState {
    pub fn new(spec: Option<SortSpec>) -> Self {
        Self(spec)
    }

    /// The state after clicking the column header `key`.
    pub fn click(&self, key: &str) -> Self {
        Self(cycle_sort(self.0.as_ref(), key))
    }

    pub fn spec(&self) -> Option<&SortSpec> {
        self.0.as_ref()
    }

    /// Direction shown on column `key`; `None` for every other column.
    pub fn direction_for(&self, key: &str) -> SortDirection {
        match &self.0 {
            Some(spec) if spec.key == key => spec.direction,
            _ => SortDirection::None,
        }
    }

    pub fn into_spec(self) -> Option<SortSpec> {
        self.0
    }
}

/// Order `records` by `key`.
///
/// `SortDirection::None` returns the input untouched. Otherwise each record's
/// key is read once, then a stable sort runs over the extracted keys.
pub fn apply_sort<T: Record>(records: Vec<T>, key: &str, direction: SortDirection) -> Vec<T> {
    if direction == SortDirection::None || records.len() < 2 {
        return records;
    }

    let mut keyed: Vec<(Option<Value>, T)> = records
        .into_iter()
        .map(|record| (record.field(key).map(|v| v.into_owned().resolve_temporal()), record))
        .collect();

    let present = keyed.iter().filter(|(k, _)| k.is_some()).count();
    debug!(
        "sort stage: {} records by '{}' {} ({} carry the key)",
        keyed.len(),
        key,
        direction.as_str(),
        present
    );

    let ordered = |a: &Option<Value>, b: &Option<Value>| -> Ordering {
        let ord = compare_keys(a, b);
        if direction == SortDirection::Descending {
            ord.reverse()
        } else {
            ord
        }
    };
    // slice::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| ordered(a, b));
    check_sorted(&keyed, |(a, _), (b, _)| ordered(a, b));

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Sort by an optional spec; `None` is the natural order.
pub fn apply_sort_spec<T: Record>(records: Vec<T>, spec: Option<&SortSpec>) -> Vec<T> {
    match spec {
        Some(spec) => apply_sort(records, &spec.key, spec.direction),
        None => records,
    }
}

fn compare_keys(a: &Option<Value>, b: &Option<Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
