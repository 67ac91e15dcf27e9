// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance and the similarity score built on it.
//!
//! All lengths are character counts, not byte lengths. The search path only
//! ever feeds normalized (ASCII) text in here, but the functions are correct
//! for arbitrary Unicode.
//!
//! `|len(a) - len(b)|` is a lower bound on edit distance. The bounded variant
//! uses it to skip the O(nm) DP outright when the lengths are too far apart,
//! which is most non-matches when the term is short and the field is long.

use crate::contracts::check_similarity_bounds;

/// Levenshtein distance: unit-cost insertions, deletions and substitutions.
///
/// Two-row DP, O(len(a) * len(b)) time, O(len(b)) space.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        for (j, bc) in b_chars.iter().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != *bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
        }
    }
    dp[b_len]
}

/// Are these strings within `max` edits of each other?
///
/// Bounded Levenshtein with two early-exit paths:
/// 1. If length difference exceeds `max`, return false immediately
/// 2. If minimum row value exceeds `max`, abandon the DP early
///
/// Both are sound: row minima never decrease, so neither rejects a real match.
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len.abs_diff(b_len) > max {
        return false;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            if dp[j + 1] < min_row {
                min_row = dp[j + 1];
            }
        }

        if min_row > max {
            return false;
        }
    }

    dp[b_len] <= max
}

/// Similarity in `[0, 1]`: `1 - distance / max(len(a), len(b))`.
///
/// Both empty is a perfect match (1.0); exactly one empty is 0.0. Symmetric,
/// but callers should not rely on any triangle inequality.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let score = 1.0 - levenshtein(a, b) as f64 / max_len as f64;
    check_similarity_bounds(score);
    score
}

/// Does `similarity(a, b) >= threshold` hold?
///
/// Converts the threshold into an edit budget first so the bounded DP can bail
/// out early; falls back to the exact ratio so rounding never flips a verdict.
pub fn similar_within(a: &str, b: &str, threshold: f64) -> bool {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return threshold <= 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return threshold <= 0.0;
    }
    let budget = ((1.0 - threshold) * max_len as f64).floor().max(0.0) as usize;
    if !levenshtein_within(a, b, budget + 1) {
        return false;
    }
    similarity(a, b) >= threshold
}
