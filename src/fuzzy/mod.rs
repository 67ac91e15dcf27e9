// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via edit distance.
//!
//! Only the last two rungs of the match ladder land here. Everything cheaper
//! (exact, prefix, substring) is tried first, so the O(nm) DP runs on the
//! small fraction of field values that nothing else explained.

pub mod levenshtein;

pub use levenshtein::*;
