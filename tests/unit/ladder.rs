//! Which rung fires, and where the span lands, on driver-table values.

use tabula::search::Term;
use tabula::{matches_term, matches_term_with, normalize, MatchConfig, MatchStrategy, Span};

#[test]
fn test_exact_wins_over_normalized_rungs() {
    // "León" would also match after normalization; the raw rung is tried first
    let result = matches_term("Nuevo Le\u{f3}n", "Le\u{f3}n");
    assert_eq!(result.strategy, Some(MatchStrategy::Exact));
    assert_eq!(result.matched_span, Some(Span::new(6, 11)));
}

#[test]
fn test_exact_on_phone_digits() {
    let result = matches_term("8112340001", "1234");
    assert_eq!(result.strategy, Some(MatchStrategy::Exact));
    assert_eq!(result.matched_span, Some(Span::new(2, 6)));
}

#[test]
fn test_normalized_equality_spans_whole_value() {
    let result = matches_term("NUEVO LE\u{d3}N", "nuevo le\u{f3}n");
    assert_eq!(result.strategy, Some(MatchStrategy::Normalized));
    assert_eq!(result.matched_span, Some(Span::new(0, 10)));
}

#[test]
fn test_suffix_after_accent_folding() {
    let result = matches_term("HEB Cumbres \u{c9}lite", "elite");
    assert_eq!(result.strategy, Some(MatchStrategy::Suffix));
    assert_eq!(result.matched_span, Some(Span::new(12, 17)));
}

#[test]
fn test_lowercase_curp_fragment() {
    let curp = "MASR880322HNLRLB01";
    let result = matches_term(curp, "masr");
    assert!(result.matched);
    // Prefix is tried before substring, and a prefix is also a substring
    assert_eq!(result.strategy, Some(MatchStrategy::Prefix));
    assert!(normalize(curp).contains(&normalize("masr")));
    assert!(!curp.contains("masr"));

    // Mid-value fragments land on the substring rung
    let result = matches_term(curp, "880322hnl");
    assert_eq!(result.strategy, Some(MatchStrategy::Substring));
    assert_eq!(result.matched_span, Some(Span::new(4, 13)));
}

#[test]
fn test_email_matches_without_punctuation() {
    let result = matches_term("roberto.martinez@example.com", "robertomartinez");
    assert_eq!(result.strategy, Some(MatchStrategy::Prefix));
}

#[test]
fn test_punctuation_only_term() {
    // Raw containment still counts
    assert_eq!(
        matches_term("DRV-0001", "-").strategy,
        Some(MatchStrategy::Exact)
    );
    // but it must not fall through to the normalized rungs
    let result = matches_term("DRV0001", "---");
    assert!(!result.matched);
    assert_eq!(result.strategy, None);
    assert_eq!(result.matched_span, None);
}

#[test]
fn test_threshold_is_configurable() {
    assert!(matches_term("Monterrey", "Monterey").matched);

    let strict = MatchConfig::default().with_threshold(0.95);
    assert!(!matches_term_with("Monterrey", "Monterey", &strict).matched);

    let loose = MatchConfig::default().with_threshold(0.6);
    assert_eq!(
        matches_term_with("Monterrey", "Montrey", &loose).strategy,
        Some(MatchStrategy::FuzzyWhole)
    );
}

#[test]
fn test_min_word_len_is_configurable() {
    let value = "Gabriela Ortega Estrada";
    assert_eq!(
        matches_term(value, "Estrda").strategy,
        Some(MatchStrategy::FuzzyWord)
    );

    let long_words_only = MatchConfig::default().with_min_word_len(8);
    assert!(!matches_term_with(value, "Estrda", &long_words_only).matched);
}

#[test]
fn test_fuzzy_word_span_points_into_normalized_value() {
    let value = "Mi Tienda San Nicolás";
    let result = matches_term(value, "Nicolaz");
    assert_eq!(result.strategy, Some(MatchStrategy::FuzzyWord));
    let span = result.matched_span.unwrap();
    assert_eq!(&normalize(value)[span.start..span.end], "nicolas");
}

#[test]
fn test_fuzzy_strategies_are_flagged() {
    assert!(MatchStrategy::FuzzyWhole.is_fuzzy());
    assert!(MatchStrategy::FuzzyWord.is_fuzzy());
    assert!(!MatchStrategy::Substring.is_fuzzy());
    assert!(!MatchStrategy::Exact.is_fuzzy());
}

#[test]
fn test_term_trims_and_normalizes_once() {
    let term = Term::new("  Peña ");
    assert_eq!(term.raw(), "Peña");
    assert_eq!(term.normalized(), "pena");
    assert!(!term.is_blank());
    assert!(Term::new(" \t ").is_blank());
}

#[test]
fn test_unrelated_value_misses() {
    let result = matches_term("Tamaulipas", "Durango");
    assert!(!result.matched);
    assert_eq!(result.strategy, None);
}
