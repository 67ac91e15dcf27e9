//! Runtime contracts for the query pipeline.
//!
//! Debug-mode assertions that re-derive each stage's promise independently of
//! the code that made it. These contracts:
//!
//! 1. Are **zero-cost in release builds** (guarded by `cfg!(debug_assertions)`)
//! 2. Provide **early failure detection** during development and in tests
//! 3. Restate the pipeline's **testable properties** in executable form
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function            | Property                                        |
//! |------------------------------|-------------------------------------------------|
//! | `check_normalized`           | normalization is idempotent, ASCII-only         |
//! | `check_similarity_bounds`    | similarity stays in `[0, 1]`                    |
//! | `check_strategy_consistent`  | the reported rung's test holds when recomputed  |
//! | `check_segments_cover`       | highlight segments concatenate to the original  |
//! | `check_sorted`               | adjacent items respect the comparator           |
//! | `check_page_consistent`      | page count and slice agree with the total       |
//!
//! # Usage
//!
//! ```ignore
//! use tabula::contracts::*;
//!
//! // In debug builds, this panics if the ladder lied about its rung
//! check_strategy_consistent(value, term, &config, &result);
//!
//! // In release builds, this is a no-op
//! ```

use std::cmp::Ordering;

use crate::fuzzy::similarity;
use crate::search::MatchConfig;
use crate::types::{MatchResult, MatchStrategy, Segment};
use crate::util::normalize::normalize;

// ============================================================================
// NORMALIZATION CONTRACTS
// ============================================================================

/// Check that a string is a fixed point of `normalize`.
///
/// # Panics (debug builds only)
/// Panics if `normalize(s) != s` or `s` contains anything outside `[a-z0-9 ]`.
#[inline]
pub fn check_normalized(s: &str) {
    if !cfg!(debug_assertions) {
        return;
    }
    debug_assert!(
        s.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b' '),
        "Contract violation: normalized text '{}' has characters outside [a-z0-9 ]",
        s
    );
    debug_assert_eq!(
        normalize(s),
        s,
        "Contract violation: normalize is not idempotent on '{}'",
        s
    );
}

/// Check that a similarity score is a ratio.
#[inline]
pub fn check_similarity_bounds(score: f64) {
    debug_assert!(
        (0.0..=1.0).contains(&score),
        "Contract violation: similarity {} outside [0, 1]",
        score
    );
}

// ============================================================================
// LADDER CONTRACTS
// ============================================================================

/// Check that the rung a match reports is independently true.
///
/// If the ladder says `Prefix`, then `normalize(value)` must start with
/// `normalize(term)`, and analogously for every other rung. The span, when
/// present, must cover exactly the text the rung compared.
///
/// # Panics (debug builds only)
/// Panics if the recomputed check disagrees with the reported strategy.
#[inline]
pub fn check_strategy_consistent(
    value: &str,
    raw_term: &str,
    config: &MatchConfig,
    result: &MatchResult,
) {
    if !cfg!(debug_assertions) {
        return;
    }
    debug_assert_eq!(
        result.matched,
        result.strategy.is_some(),
        "Contract violation: matched={} but strategy={:?}",
        result.matched,
        result.strategy
    );
    let Some(strategy) = result.strategy else {
        return;
    };

    let term = raw_term.trim();
    let haystack = normalize(value);
    let needle = normalize(term);

    let holds = match strategy {
        MatchStrategy::Empty => term.is_empty(),
        MatchStrategy::Exact => value.contains(term),
        MatchStrategy::Normalized => haystack == needle,
        MatchStrategy::Prefix => haystack.starts_with(&needle),
        MatchStrategy::Suffix => haystack.ends_with(&needle),
        MatchStrategy::Substring => haystack.contains(&needle),
        MatchStrategy::FuzzyWhole => similarity(&haystack, &needle) >= config.fuzzy_threshold,
        MatchStrategy::FuzzyWord => haystack.split(' ').any(|word| {
            word.chars().count() >= config.min_word_len
                && similarity(word, &needle) >= config.fuzzy_threshold
        }),
    };
    debug_assert!(
        holds,
        "Contract violation: strategy {} does not hold for value='{}', term='{}'",
        strategy,
        value,
        term
    );

    if let Some(span) = result.matched_span {
        let source = if strategy == MatchStrategy::Exact {
            value
        } else {
            haystack.as_str()
        };
        debug_assert!(
            span.end <= source.len() && source.is_char_boundary(span.start),
            "Contract violation: span {:?} out of bounds for '{}'",
            span,
            source
        );
    }
}

// ============================================================================
// HIGHLIGHT CONTRACTS
// ============================================================================

/// Check that highlighting neither drops nor invents text.
///
/// # Panics (debug builds only)
/// Panics if the concatenated segments differ from the original.
#[inline]
pub fn check_segments_cover(original: &str, segments: &[Segment<'_>]) {
    if !cfg!(debug_assertions) {
        return;
    }
    let rebuilt: String = segments.iter().map(|s| s.text.as_ref()).collect();
    debug_assert_eq!(
        rebuilt, original,
        "Contract violation: highlight segments do not reproduce the original"
    );
}

// ============================================================================
// SORT AND PAGE CONTRACTS
// ============================================================================

/// Check that a slice is ordered under `cmp`.
#[inline]
pub fn check_sorted<T>(items: &[T], mut cmp: impl FnMut(&T, &T) -> Ordering) {
    if !cfg!(debug_assertions) {
        return;
    }
    for i in 1..items.len() {
        debug_assert!(
            cmp(&items[i - 1], &items[i]) != Ordering::Greater,
            "Contract violation: items[{}] sorts after items[{}]",
            i - 1,
            i
        );
    }
}

/// Check the page arithmetic.
///
/// `total_pages == max(1, ceil(total / page_size))` and the served slice is no
/// larger than a page.
#[inline]
pub fn check_page_consistent(total: usize, page_size: usize, total_pages: usize, served: usize) {
    debug_assert!(
        total_pages >= 1,
        "Contract violation: total_pages must be at least 1"
    );
    if page_size > 0 {
        debug_assert_eq!(
            total_pages,
            total.div_ceil(page_size).max(1),
            "Contract violation: {} pages for {} items of size {}",
            total_pages,
            total,
            page_size
        );
        debug_assert!(
            served <= page_size,
            "Contract violation: served {} items on a page of {}",
            served,
            page_size
        );
    }
}
