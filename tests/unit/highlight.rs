//! Highlighter segments on real field values.

use super::common::render;
use tabula::search::has_highlight;
use tabula::{highlight, Segment};

fn concat(segments: &[Segment<'_>]) -> String {
    segments.iter().map(|s| s.text.as_ref()).collect()
}

#[test]
fn test_accent_insensitive_mark_keeps_original_accents() {
    let segments = highlight("Roberto Martínez Silva", "martinez");
    assert_eq!(render(&segments), "Roberto [Martínez] Silva");
}

#[test]
fn test_literal_match_ignores_case_beyond_ascii() {
    assert_eq!(render(&highlight("HEB CUMBRES ÉLITE", "élite")), "HEB CUMBRES [ÉLITE]");
}

#[test]
fn test_curp_prefix_is_marked() {
    assert_eq!(
        render(&highlight("MASR880322HNLRLB01", "masr")),
        "[MASR]880322HNLRLB01"
    );
}

#[test]
fn test_fuzzy_match_is_not_marked() {
    let segments = highlight("Monterrey", "Monterey");
    assert_eq!(segments.len(), 1);
    assert!(!has_highlight(&segments));
    assert_eq!(segments[0].text, "Monterrey");
}

#[test]
fn test_blank_term_and_empty_text() {
    assert_eq!(render(&highlight("Durango", "   ")), "Durango");
    let segments = highlight("", "dur");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].text, "");
    assert!(!segments[0].matched);
}

#[test]
fn test_segments_reassemble_original() {
    let cases = [
        ("Silvia Silva Muñoz", "silv"),
        ("Nuevo León", "leon"),
        ("(81) 1234-5678", "81) 1"),
        ("a.b*c?", ".*"),
        ("Peña León", "ñ"),
        ("Mi Tienda San Nicolás", "nicolas"),
        ("x", "xyz"),
    ];
    for (text, term) in cases {
        let segments = highlight(text, term);
        assert_eq!(concat(&segments), text, "segments lost text for {:?}", term);
        assert!(
            segments.windows(2).all(|w| w[0].matched || w[1].matched),
            "adjacent plain segments for {:?} in {:?}",
            term,
            text
        );
    }
}

#[test]
fn test_regex_syntax_in_term_is_literal() {
    assert_eq!(render(&highlight("a.b*c?", ".*")), "a.b*c?");
    assert_eq!(render(&highlight("a.b*c?", "b*")), "a.[b*]c?");
    assert_eq!(render(&highlight("(81) 1234", "(81)")), "[(81)] 1234");
}
