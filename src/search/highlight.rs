// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Mark the part of a field value that a search term matched.
//!
//! Two paths, in order:
//!
//! 1. **Literal.** Case-insensitive match of the escaped raw term against the
//!    original text. Every occurrence is marked.
//! 2. **Normalized.** When the term only matches after normalization
//!    ("Leon" in "Nuevo León", "masr" in "MASR-88"), find the normalized term
//!    in the normalized text and map that one span back to original byte
//!    offsets through [`normalize_mapped`].
//!
//! If neither path finds a span (a fuzzy match, or no match at all) the text
//! comes back as a single plain segment. Concatenating the segments always
//! reproduces the original text exactly.

use regex::RegexBuilder;

use crate::contracts::check_segments_cover;
use crate::types::Segment;
use crate::util::normalize::{normalize, normalize_mapped};

/// Split `original` into marked and plain segments for `raw_term`.
///
/// Never panics on user input: regex metacharacters in the term are escaped
/// before the pattern is built.
pub fn highlight<'a>(original: &'a str, raw_term: &str) -> Vec<Segment<'a>> {
    let term = raw_term.trim();
    let segments = if term.is_empty() || original.is_empty() {
        vec![Segment::plain(original)]
    } else if let Some(segments) = literal_segments(original, term) {
        segments
    } else if let Some(segments) = normalized_segments(original, term) {
        segments
    } else {
        vec![Segment::plain(original)]
    };
    check_segments_cover(original, &segments);
    segments
}

/// True when any segment is marked.
pub fn has_highlight(segments: &[Segment<'_>]) -> bool {
    segments.iter().any(|s| s.matched)
}

fn literal_segments<'a>(original: &'a str, term: &str) -> Option<Vec<Segment<'a>>> {
    let pattern = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
        .ok()?;

    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(original) {
        if found.start() > cursor {
            segments.push(Segment::plain(&original[cursor..found.start()]));
        }
        segments.push(Segment::marked(found.as_str()));
        cursor = found.end();
    }

    if segments.is_empty() {
        return None;
    }
    if cursor < original.len() {
        segments.push(Segment::plain(&original[cursor..]));
    }
    Some(segments)
}

fn normalized_segments<'a>(original: &'a str, term: &str) -> Option<Vec<Segment<'a>>> {
    let needle = normalize(term);
    if needle.is_empty() {
        return None;
    }
    let mapped = normalize_mapped(original);
    let start = mapped.text.find(&needle)?;
    let span = mapped.source_range(start..start + needle.len())?;

    let mut segments = Vec::with_capacity(3);
    if span.start > 0 {
        segments.push(Segment::plain(&original[..span.start]));
    }
    segments.push(Segment::marked(&original[span.clone()]));
    if span.end < original.len() {
        segments.push(Segment::plain(&original[span.end..]));
    }
    Some(segments)
}
