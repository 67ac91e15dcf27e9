// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a record query.
//!
//! These types define how records, field values, match outcomes and views fit
//! together. The engine never owns the caller's records: stages take `&[R]` and
//! hand back references, so a view is always a window onto the caller's data.
//!
//! | Rust Type      | Purpose                                            |
//! |----------------|----------------------------------------------------|
//! | `Value`        | A scalar field value (text, number, bool, date)    |
//! | `Record`       | Named-field access, the only thing the engine needs|
//! | `MapRecord`    | Ordered field map, what the JSON loader produces   |
//! | `RecordSet`    | A collection whose schema was checked once         |
//! | `MatchResult`  | Which ladder rung matched, and where               |
//! | `Segment`      | One run of highlighted or plain text               |
//! | `ViewResult`   | The page handed back to the caller                 |
//!
//! # Invariants
//!
//! - **RecordSet**: every record has the same field set as the first one.
//!   Checked in `RecordSet::new`, never again.
//!
//! - **Span**: `start <= end`. For `MatchStrategy::Exact` the offsets index the
//!   raw field value; for every other strategy they index the normalized value.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

// =============================================================================
// VALUES
// =============================================================================

/// A scalar field value.
///
/// Dates are local wall-clock instants. Ordering between values of the same
/// variant is the natural ordering of that type; see [`Value::compare`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Date(NaiveDateTime),
    Text(String),
}

impl Value {
    /// Text the search and export stages see for this value.
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Value::Text(s) => Cow::Borrowed(s.as_str()),
            Value::Number(n) => Cow::Owned(format_number(*n)),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Date(d) => Cow::Owned(d.format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }

    /// Borrow the text if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce to a local instant.
    ///
    /// `Date` values pass through. Text is accepted in the shapes the
    /// dashboards produce: RFC 3339 (converted to local time), naive ISO-8601
    /// date-times with or without fractional seconds, and bare dates (taken
    /// as local midnight).
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Text(s) => parse_datetime(s),
            _ => None,
        }
    }

    /// Type-aware comparison.
    ///
    /// `Date` values and text that parses as a date share one temporal class
    /// and compare by instant, so a column mixing the two orders consistently.
    /// Other variants compare naturally within their own class. Across classes
    /// the order is Bool < Number < temporal < Text, which keeps the ordering
    /// total.
    pub fn compare(&self, other: &Value) -> Ordering {
        self.sort_key().order(&other.sort_key())
    }

    /// Parse date-like text into `Date`, leaving everything else as is.
    ///
    /// Equivalent under [`Value::compare`]; lets a sort parse each key once.
    pub fn resolve_temporal(self) -> Value {
        match self {
            Value::Text(s) => match parse_datetime(&s) {
                Some(d) => Value::Date(d),
                None => Value::Text(s),
            },
            other => other,
        }
    }

    fn sort_key(&self) -> SortKey<'_> {
        match self {
            Value::Bool(b) => SortKey::Bool(*b),
            Value::Number(n) => SortKey::Number(*n),
            Value::Date(d) => SortKey::Instant(*d),
            Value::Text(s) => parse_datetime(s).map_or(SortKey::Text(s), SortKey::Instant),
        }
    }
}

/// What [`Value::compare`] actually orders by.
#[derive(Debug, Clone, Copy)]
enum SortKey<'a> {
    Bool(bool),
    Number(f64),
    Instant(NaiveDateTime),
    Text(&'a str),
}

impl SortKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Bool(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Instant(_) => 2,
            SortKey::Text(_) => 3,
        }
    }

    fn order(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(d: NaiveDateTime) -> Self {
        Value::Date(d)
    }
}

/// Integers print without a trailing `.0`, matching how the dashboards show ids
/// and counts.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Parse the date shapes accepted by [`Value::as_datetime`].
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    // Every accepted shape starts with the year
    if !s.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// =============================================================================
// RECORDS
// =============================================================================

/// Named-field access: everything the engine asks of a record.
///
/// Unknown names return `None`; the stages treat that as "absent" and never
/// fail on it.
pub trait Record {
    /// Look up a field by name.
    fn field(&self, name: &str) -> Option<Cow<'_, Value>>;

    /// Names of every field this record carries, in a stable order.
    fn field_names(&self) -> Vec<&str>;
}

/// A record backed by an ordered field map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapRecord {
    fields: BTreeMap<String, Value>,
}

impl MapRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Record for MapRecord {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.fields.get(name).map(Cow::Borrowed)
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        (**self).field(name)
    }

    fn field_names(&self) -> Vec<&str> {
        (**self).field_names()
    }
}

/// A record collection whose homogeneous schema has been validated.
#[derive(Debug, Clone)]
pub struct RecordSet<R> {
    records: Vec<R>,
}

impl<R: Record> RecordSet<R> {
    /// Validate that every record carries the same field set as the first.
    pub fn new(records: Vec<R>) -> Result<Self, QueryError> {
        if let Some(first) = records.first() {
            let mut expected: Vec<String> =
                first.field_names().into_iter().map(str::to_string).collect();
            expected.sort();
            for (index, record) in records.iter().enumerate().skip(1) {
                let mut found: Vec<&str> = record.field_names();
                found.sort_unstable();
                if found.len() != expected.len()
                    || found.iter().zip(&expected).any(|(a, b)| *a != b.as_str())
                {
                    return Err(QueryError::SchemaMismatch {
                        index,
                        expected: expected.join(", "),
                        found: found.join(", "),
                    });
                }
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_inner(self) -> Vec<R> {
        self.records
    }
}

impl<R> std::ops::Deref for RecordSet<R> {
    type Target = [R];

    fn deref(&self) -> &[R] {
        &self.records
    }
}

// =============================================================================
// MATCH OUTCOMES
// =============================================================================

/// Which rung of the match ladder accepted a term.
///
/// Variants are listed in ladder order: cheapest and most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// Vacuous match for an empty term.
    Empty,
    /// Raw term appears byte-for-byte in the raw value.
    Exact,
    /// Normalized value equals normalized term.
    Normalized,
    Prefix,
    Suffix,
    Substring,
    /// Whole normalized value is similar enough to the term.
    FuzzyWhole,
    /// One word of the normalized value is similar enough to the term.
    FuzzyWord,
}

impl MatchStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStrategy::Empty => "empty",
            MatchStrategy::Exact => "exact",
            MatchStrategy::Normalized => "normalized",
            MatchStrategy::Prefix => "prefix",
            MatchStrategy::Suffix => "suffix",
            MatchStrategy::Substring => "substring",
            MatchStrategy::FuzzyWhole => "fuzzy-whole",
            MatchStrategy::FuzzyWord => "fuzzy-word",
        }
    }

    /// True for the two edit-distance rungs.
    pub fn is_fuzzy(self) -> bool {
        matches!(self, MatchStrategy::FuzzyWhole | MatchStrategy::FuzzyWord)
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} > end {}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Outcome of evaluating one term against one field value.
///
/// Ephemeral: recomputed every query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matched: bool,
    /// Rung that accepted the term; `None` when nothing matched.
    pub strategy: Option<MatchStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_span: Option<Span>,
}

impl MatchResult {
    pub fn hit(strategy: MatchStrategy, span: Option<Span>) -> Self {
        Self {
            matched: true,
            strategy: Some(strategy),
            matched_span: span,
        }
    }

    pub fn miss() -> Self {
        Self {
            matched: false,
            strategy: None,
            matched_span: None,
        }
    }
}

/// One run of text in a highlighted rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: Cow<'a, str>,
    pub matched: bool,
}

impl<'a> Segment<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            matched: false,
        }
    }

    pub fn marked(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            matched: true,
        }
    }
}

// =============================================================================
// VIEW
// =============================================================================

/// The page of records handed back to the caller.
///
/// Derived on every descriptor change; the engine keeps no copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult<'a, R> {
    pub items: Vec<&'a R>,
    /// Records that survived filtering and search, across all pages.
    pub total_count: usize,
    /// Size of the collection before filtering ("filtered from N").
    pub filtered_from: usize,
    /// The page actually served (1-indexed, after clamping malformed input).
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<R> ViewResult<'_, R> {
    /// True when filtering or search dropped at least one record.
    pub fn is_filtered(&self) -> bool {
        self.total_count != self.filtered_from
    }

    /// 1-based indices of the first and last item on this page, if any.
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page - 1) * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }
}
