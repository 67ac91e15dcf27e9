// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Comparison text with diacritics and punctuation folded away.
//!
//! Every comparison past the first ladder rung happens on normalized text, so
//! this is the foundation the rest of the engine stands on. Two entry points:
//! [`normalize`] for comparisons, and [`normalize_mapped`] for the highlighter,
//! which also needs to know where each normalized character came from in the
//! original string.
//!
//! # Algorithm
//!
//! 1. NFD normalize (decompose characters into base + combining marks)
//! 2. Drop combining diacritical marks
//! 3. Lowercase
//! 4. Keep only `[a-z0-9]` and whitespace
//! 5. Collapse whitespace runs to one space, trim both ends
//!
//! The output is pure ASCII, so byte offsets and character offsets into it
//! coincide. `normalize(normalize(s)) == normalize(s)` for every `s`.

use std::ops::Range;

use unicode_normalization::UnicodeNormalization;

/// Normalize a string for comparison.
///
/// - "Nuevo León" → "nuevo leon"
/// - "MASR880322..." → "masr880322"
/// - "  San   Pedro " → "san pedro"
/// - "Mónica.Cruz@email.com" → "monicacruzemailcom"
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| is_kept(*c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized text plus, for every normalized byte, the byte range of the
/// original character it came from.
///
/// `normalize_mapped(s).text == normalize(s)`. Collapsed whitespace maps to
/// the first whitespace character of the run it replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedText {
    pub text: String,
    pub sources: Vec<Range<usize>>,
}

impl MappedText {
    /// Translate a byte range of the normalized text back into a byte range of
    /// the original. Returns `None` for empty or out-of-bounds ranges.
    pub fn source_range(&self, normalized: Range<usize>) -> Option<Range<usize>> {
        if normalized.start >= normalized.end || normalized.end > self.sources.len() {
            return None;
        }
        let start = self.sources[normalized.start].start;
        let end = self.sources[normalized.end - 1].end;
        Some(start..end)
    }
}

/// Normalize while tracking source offsets.
///
/// Works one original character at a time. Per-character NFD differs from
/// whole-string NFD only in the canonical ordering of combining marks, and
/// those are all discarded, so the text is identical to [`normalize`].
pub fn normalize_mapped(value: &str) -> MappedText {
    let mut text = String::with_capacity(value.len());
    let mut sources = Vec::with_capacity(value.len());
    let mut pending_space: Option<Range<usize>> = None;

    for (offset, original) in value.char_indices() {
        let source = offset..offset + original.len_utf8();
        let kept = std::iter::once(original)
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .filter(|c| is_kept(*c));

        for c in kept {
            if c.is_whitespace() {
                if !text.is_empty() && pending_space.is_none() {
                    pending_space = Some(source.clone());
                }
                continue;
            }
            if let Some(space) = pending_space.take() {
                text.push(' ');
                sources.push(space);
            }
            text.push(c);
            sources.push(source.clone());
        }
    }

    MappedText { text, sources }
}

/// Combining Diacritical Marks, the block NFD splits Latin accents into.
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

fn is_kept(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace()
}
