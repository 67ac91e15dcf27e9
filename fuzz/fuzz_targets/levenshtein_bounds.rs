// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for edit distance and similarity.
//!
//! The bounded variant exits early on two conditions; both must be sound. The
//! similarity shortcut converts a threshold into an edit budget; it must agree
//! with the plain ratio.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabula::fuzzy::{levenshtein, levenshtein_within, similar_within, similarity};

#[derive(Debug, Arbitrary)]
struct DistanceInput {
    a: String,
    b: String,
    max: u8,
    threshold: u8,
}

fuzz_target!(|input: DistanceInput| {
    let a: String = input.a.chars().take(60).collect();
    let b: String = input.b.chars().take(60).collect();
    let max = usize::from(input.max % 8);
    let threshold = f64::from(input.threshold) / 255.0;

    let d = levenshtein(&a, &b);

    // INVARIANT 1: bounded agrees with full
    assert_eq!(levenshtein_within(&a, &b, max), d <= max);

    // INVARIANT 2: symmetric, zero only on equal strings
    assert_eq!(d, levenshtein(&b, &a));
    assert_eq!(d == 0, a == b);

    // INVARIANT 3: length difference is a lower bound, longer length an upper one
    let (la, lb) = (a.chars().count(), b.chars().count());
    assert!(la.abs_diff(lb) <= d && d <= la.max(lb));

    // INVARIANT 4: similarity is a ratio and the shortcut agrees with it
    let s = similarity(&a, &b);
    assert!((0.0..=1.0).contains(&s));
    assert_eq!(similar_within(&a, &b, threshold), s >= threshold);
});
