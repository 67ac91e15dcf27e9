// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the match ladder.
//!
//! Every verdict the ladder returns must be re-derivable from plain string
//! operations on the same input. If the ladder says "prefix", the normalized
//! value had better start with the normalized term.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabula::{matches_term_with, normalize, MatchConfig, MatchStrategy};

#[derive(Debug, Arbitrary)]
struct LadderInput {
    value: String,
    term: String,
    /// Threshold in hundredths, folded into [0.5, 1.0]
    threshold: u8,
    min_word_len: u8,
}

fuzz_target!(|input: LadderInput| {
    // Cap lengths to avoid timeouts in the O(nm) rungs
    let value: String = input.value.chars().take(200).collect();
    let term: String = input.term.chars().take(50).collect();

    let config = MatchConfig::default()
        .with_threshold(0.5 + f64::from(input.threshold % 51) / 100.0)
        .with_min_word_len(usize::from(input.min_word_len % 8));

    let result = matches_term_with(&value, &term, &config);
    let raw = term.trim();
    let (nv, nt) = (normalize(&value), normalize(&term));

    // INVARIANT 1: matched iff a strategy is reported
    assert_eq!(result.matched, result.strategy.is_some());

    // INVARIANT 2: the reported rung holds
    match result.strategy {
        Some(MatchStrategy::Empty) => assert!(raw.is_empty()),
        Some(MatchStrategy::Exact) => assert!(value.contains(raw)),
        Some(MatchStrategy::Normalized) => assert_eq!(nv, nt),
        Some(MatchStrategy::Prefix) => assert!(nv.starts_with(&nt)),
        Some(MatchStrategy::Suffix) => assert!(nv.ends_with(&nt)),
        Some(MatchStrategy::Substring) => assert!(nv.contains(&nt)),
        Some(MatchStrategy::FuzzyWhole) | Some(MatchStrategy::FuzzyWord) => {
            assert!(!nt.is_empty() && !nv.contains(&nt))
        }
        None => assert!(!raw.is_empty()),
    }

    // INVARIANT 3: spans index the text the rung compared
    if let (Some(span), Some(strategy)) = (result.matched_span, result.strategy) {
        let source = if strategy == MatchStrategy::Exact { value.as_str() } else { nv.as_str() };
        assert!(span.start <= span.end && span.end <= source.len());
        assert!(source.is_char_boundary(span.start) && source.is_char_boundary(span.end));
    }

    // INVARIANT 4: a value always matches itself
    assert!(matches_term_with(&value, &value, &config).matched);
});
