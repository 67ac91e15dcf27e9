// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Free-text search: where the rubber meets the road.
//!
//! The ladder decides whether a record's field matches what the user typed,
//! the highlighter shows them why. The two are deliberately independent: the
//! ladder works on normalized text and reports normalized offsets, the
//! highlighter re-derives its span against the original text so the UI can
//! mark exactly what the user sees.

pub mod highlight;
pub mod ladder;

pub use highlight::{has_highlight, highlight};
pub use ladder::{
    evaluate, matches_term, matches_term_with, MatchConfig, Term, DEFAULT_FUZZY_THRESHOLD,
    DEFAULT_MIN_WORD_LEN,
};
