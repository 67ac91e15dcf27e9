// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query pipeline: filter, search, sort, paginate.
//!
//! ```text
//! records ──► Filter Stage ──► Search (ladder, OR across fields) ──► Sort ──► Paginate ──► ViewResult
//!                                                                     │
//!                                                                     └──► matching() (export-all slice)
//! ```
//!
//! A [`QueryDescriptor`] is one user intent: built fresh on every keystroke,
//! click or page change, never mutated in place. The helper methods return a
//! new descriptor and reset the page whenever the change invalidates "page N".
//!
//! The [`QueryEngine`] holds only its [`MatchConfig`]. It owns no records and
//! caches nothing, so two engines (or two threads sharing one) never observe
//! each other.

use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::filter::{active_count, apply_filters, FieldFilter};
use crate::paginate::paginate;
use crate::search::{evaluate, MatchConfig, Term};
use crate::sort::{apply_sort_spec, cycle_sort, SortSpec};
use crate::types::{MatchResult, Record, ViewResult};

/// Page size used when a descriptor does not name one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

// =============================================================================
// DESCRIPTOR
// =============================================================================

/// One query intent.
///
/// `page` and `page_size` are signed so that whatever the caller hands over
/// deserializes: a page below 1 is served as page 1, a page size of 0 or less
/// puts every record on a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryDescriptor {
    pub search_term: String,
    pub search_fields: Vec<String>,
    pub filters: Vec<FieldFilter>,
    pub sort: Option<SortSpec>,
    pub page: i64,
    pub page_size: i64,
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            search_fields: Vec::new(),
            filters: Vec::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// New search term; back to page 1.
    pub fn with_search(&self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_search_fields<I, S>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_fields: fields.into_iter().map(Into::into).collect(),
            page: 1,
            ..self.clone()
        }
    }

    /// Replace the whole filter list; back to page 1.
    pub fn with_filters(&self, filters: Vec<FieldFilter>) -> Self {
        Self {
            filters,
            page: 1,
            ..self.clone()
        }
    }

    /// Set one filter, replacing any existing filter on the same field.
    pub fn with_filter(&self, filter: FieldFilter) -> Self {
        let mut filters: Vec<FieldFilter> = self
            .filters
            .iter()
            .filter(|f| f.field() != filter.field())
            .cloned()
            .collect();
        filters.push(filter);
        self.with_filters(filters)
    }

    /// Drop every filter; back to page 1.
    pub fn cleared_filters(&self) -> Self {
        self.with_filters(Vec::new())
    }

    pub fn with_sort(&self, sort: Option<SortSpec>) -> Self {
        Self {
            sort,
            page: 1,
            ..self.clone()
        }
    }

    /// Apply a column-header click (asc → desc → none); back to page 1.
    pub fn with_sort_click(&self, key: &str) -> Self {
        self.with_sort(cycle_sort(self.sort.as_ref(), key))
    }

    pub fn with_page(&self, page: i64) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// New page size; back to page 1.
    pub fn with_page_size(&self, page_size: i64) -> Self {
        Self {
            page_size,
            page: 1,
            ..self.clone()
        }
    }

    /// Filters that actually constrain something.
    pub fn active_filter_count(&self) -> usize {
        active_count(&self.filters)
    }

    /// The 1-indexed page to serve.
    pub fn page_number(&self) -> usize {
        usize::try_from(self.page.max(1)).unwrap_or(1)
    }

    /// Page size to slice with; 0 means everything on one page.
    pub fn effective_page_size(&self) -> usize {
        usize::try_from(self.page_size.max(0)).unwrap_or(0)
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// How one field fared against the search term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    pub field: String,
    /// The field's display text; `None` when the record lacks the field.
    pub value: Option<String>,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    config: MatchConfig,
}

impl QueryEngine {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Every record that survives filters and search, sorted, unpaginated.
    ///
    /// This is the "export all" slice.
    pub fn matching<'a, R: Record>(
        &self,
        records: &'a [R],
        descriptor: &QueryDescriptor,
    ) -> Vec<&'a R> {
        let filtered = apply_filters(records, &descriptor.filters);

        let term = Term::new(&descriptor.search_term);
        let searched: Vec<&'a R> = if term.is_blank() || descriptor.search_fields.is_empty() {
            filtered
        } else {
            let before = filtered.len();
            let kept: Vec<&'a R> = filtered
                .into_iter()
                .filter(|record| self.record_matches(*record, &term, &descriptor.search_fields))
                .collect();
            debug!(
                "search stage: {:?} over {:?} kept {} of {}",
                term.raw(),
                descriptor.search_fields,
                kept.len(),
                before
            );
            kept
        };

        apply_sort_spec(searched, descriptor.sort.as_ref())
    }

    /// Run the whole pipeline and serve one page.
    pub fn execute<'a, R: Record>(
        &self,
        records: &'a [R],
        descriptor: &QueryDescriptor,
    ) -> ViewResult<'a, R> {
        let matched = self.matching(records, descriptor);
        let total_count = matched.len();
        let page_size = descriptor.effective_page_size();
        let page = paginate(matched, descriptor.page_number(), page_size);

        debug!(
            "view: page {}/{} with {} of {} records ({} before filtering)",
            page.page,
            page.total_pages,
            page.items.len(),
            total_count,
            records.len()
        );

        ViewResult {
            items: page.items,
            total_count,
            filtered_from: records.len(),
            page: page.page,
            page_size: if page_size == 0 { total_count.max(1) } else { page_size },
            total_pages: page.total_pages,
        }
    }

    /// True when any of `fields` matches `term`. A blank term matches.
    pub fn record_matches<R: Record + ?Sized>(
        &self,
        record: &R,
        term: &Term,
        fields: &[String],
    ) -> bool {
        if term.is_blank() {
            return true;
        }
        fields.iter().any(|field| {
            record
                .field(field)
                .is_some_and(|value| evaluate(&value.display(), term, &self.config).matched)
        })
    }

    /// Per-field ladder outcomes, for showing which strategy fired.
    pub fn explain<R: Record + ?Sized>(
        &self,
        record: &R,
        raw_term: &str,
        fields: &[String],
    ) -> Vec<FieldMatch> {
        let term = Term::new(raw_term);
        fields
            .iter()
            .map(|field| match record.field(field) {
                Some(value) => {
                    let text = value.display().into_owned();
                    let result = evaluate(&text, &term, &self.config);
                    FieldMatch {
                        field: field.clone(),
                        value: Some(text),
                        result,
                    }
                }
                None => FieldMatch {
                    field: field.clone(),
                    value: None,
                    result: MatchResult::miss(),
                },
            })
            .collect()
    }
}

// =============================================================================
// SEARCH HISTORY
// =============================================================================

/// Terms kept in a [`SearchHistory`].
pub const HISTORY_LIMIT: usize = 5;

/// Shortest term (in characters) worth remembering.
pub const MIN_HISTORY_TERM_LEN: usize = 2;

/// Recent search terms, most recent first.
///
/// A plain value the caller persists however it likes. Re-entering a term
/// moves it to the front instead of duplicating it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    terms: VecDeque<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `term`. Returns false when it was too short to keep.
    pub fn record(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.chars().count() < MIN_HISTORY_TERM_LEN {
            return false;
        }
        self.terms.retain(|t| t != term);
        self.terms.push_front(term.to_string());
        self.terms.truncate(HISTORY_LIMIT);
        true
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.terms.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }
}
