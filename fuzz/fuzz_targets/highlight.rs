// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the highlighter.
//!
//! The term goes into a regex, and the normalized span is mapped back through
//! byte offsets. Either step going wrong shows up as a panic on a char
//! boundary or as segments that no longer spell the original.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tabula::highlight;

fuzz_target!(|input: (String, String)| {
    let (text, term) = input;
    let text: String = text.chars().take(300).collect();
    let term: String = term.chars().take(60).collect();

    let segments = highlight(&text, &term);

    // INVARIANT 1: segments concatenate to the original
    let joined: String = segments.iter().map(|s| s.text.as_ref()).collect();
    assert_eq!(joined, text);

    // INVARIANT 2: no empty marked segment
    assert!(segments.iter().filter(|s| s.matched).all(|s| !s.text.is_empty()));

    // INVARIANT 3: a blank term marks nothing
    if term.trim().is_empty() {
        assert!(segments.iter().all(|s| !s.matched));
    }
});
