// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The match ladder: does this term match this field value, and how?
//!
//! Seven rungs, tried in order, first success wins:
//!
//! | Rung | Strategy      | Test                                              |
//! |------|---------------|---------------------------------------------------|
//! | 1    | `Exact`       | raw term is a byte substring of the raw value     |
//! | 2    | `Normalized`  | `norm(value) == norm(term)`                       |
//! | 3    | `Prefix`      | `norm(value).starts_with(norm(term))`             |
//! | 4    | `Suffix`      | `norm(value).ends_with(norm(term))`               |
//! | 5    | `Substring`   | `norm(value).contains(norm(term))`                |
//! | 6    | `FuzzyWhole`  | `similarity(norm(value), norm(term)) >= t`        |
//! | 7    | `FuzzyWord`   | some word of `norm(value)`, `len >= w`, is `>= t` |
//!
//! Rungs 1-5 are linear scans and catch nearly every real query. Rungs 6-7 pay
//! for a full edit-distance DP and only run when nothing cheaper worked.
//!
//! The threshold `t` and minimum word length `w` live in [`MatchConfig`].

use log::trace;
use serde::{Deserialize, Serialize};

use crate::contracts::{check_normalized, check_strategy_consistent};
use crate::fuzzy::similar_within;
use crate::types::{MatchResult, MatchStrategy, Span};
use crate::util::normalize::normalize;

/// Default similarity a fuzzy rung must reach.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.85;

/// Default minimum word length (in characters) for the per-word fuzzy rung.
pub const DEFAULT_MIN_WORD_LEN: usize = 3;

/// Tuning knobs for the fuzzy rungs.
///
/// Both values are empirical; neither has a derivation behind it, so both
/// stay overridable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchConfig {
    pub fuzzy_threshold: f64,
    pub min_word_len: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            min_word_len: DEFAULT_MIN_WORD_LEN,
        }
    }
}

impl MatchConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_min_word_len(mut self, len: usize) -> Self {
        self.min_word_len = len;
        self
    }
}

/// A search term, normalized once and reused across every field of every
/// record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    raw: String,
    normalized: String,
}

impl Term {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        let normalized = normalize(raw);
        check_normalized(&normalized);
        Self {
            raw: raw.to_string(),
            normalized,
        }
    }

    /// The trimmed term as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Blank terms match everything.
    pub fn is_blank(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Evaluate one term against one field value with the default config.
pub fn matches_term(field_value: &str, raw_term: &str) -> MatchResult {
    evaluate(field_value, &Term::new(raw_term), &MatchConfig::default())
}

/// Evaluate with an explicit config.
pub fn matches_term_with(field_value: &str, raw_term: &str, config: &MatchConfig) -> MatchResult {
    evaluate(field_value, &Term::new(raw_term), config)
}

/// Walk the ladder for a pre-normalized term.
pub fn evaluate(field_value: &str, term: &Term, config: &MatchConfig) -> MatchResult {
    let result = climb(field_value, term, config);
    trace!(
        "ladder {:?} vs {:?}: {:?}",
        term.raw(),
        field_value,
        result.strategy
    );
    check_strategy_consistent(field_value, term.raw(), config, &result);
    result
}

fn climb(value: &str, term: &Term, config: &MatchConfig) -> MatchResult {
    if term.is_blank() {
        return MatchResult::hit(MatchStrategy::Empty, None);
    }

    // 1. Raw byte containment: "did the user type exactly this"
    if let Some(start) = value.find(term.raw()) {
        return MatchResult::hit(
            MatchStrategy::Exact,
            Some(Span::new(start, start + term.raw().len())),
        );
    }

    // A term made only of punctuation normalizes to nothing. Letting it reach
    // the prefix rung would match every record.
    let needle = term.normalized();
    if needle.is_empty() {
        return MatchResult::miss();
    }

    let haystack = normalize(value);
    let whole = Span::new(0, haystack.len());

    // 2-5. Normalized comparisons, most specific first
    if haystack == needle {
        return MatchResult::hit(MatchStrategy::Normalized, Some(whole));
    }
    if haystack.starts_with(needle) {
        return MatchResult::hit(MatchStrategy::Prefix, Some(Span::new(0, needle.len())));
    }
    if haystack.ends_with(needle) {
        let start = haystack.len() - needle.len();
        return MatchResult::hit(MatchStrategy::Suffix, Some(Span::new(start, haystack.len())));
    }
    if let Some(start) = haystack.find(needle) {
        return MatchResult::hit(
            MatchStrategy::Substring,
            Some(Span::new(start, start + needle.len())),
        );
    }

    // 6. Whole-value similarity
    if similar_within(&haystack, needle, config.fuzzy_threshold) {
        return MatchResult::hit(MatchStrategy::FuzzyWhole, Some(whole));
    }

    // 7. Per-word similarity, skipping short words that match anything
    for (start, word) in words_with_offsets(&haystack) {
        if word.chars().count() >= config.min_word_len
            && similar_within(word, needle, config.fuzzy_threshold)
        {
            return MatchResult::hit(
                MatchStrategy::FuzzyWord,
                Some(Span::new(start, start + word.len())),
            );
        }
    }

    MatchResult::miss()
}

/// Space-separated words of normalized text with their byte offsets.
pub(crate) fn words_with_offsets(normalized: &str) -> impl Iterator<Item = (usize, &str)> {
    normalized
        .split(' ')
        .scan(0usize, |offset, word| {
            let start = *offset;
            *offset += word.len() + 1;
            Some((start, word))
        })
        .filter(|(_, word)| !word.is_empty())
}
