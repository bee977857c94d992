//! Testing utilities for formula_mix
//!
//! Shared assertions and proptest strategies used by the engine's test
//! modules.
//!
//! # Equality of words
//!
//! Decoding shows words without their parentheses, so a decoded word is not
//! byte-equal to what the user typed. Two words are considered equal when they
//! normalize to the same canonical form; [`assert_round_trip`] checks exactly
//! that.

use crate::logic::formula::{decode, EncodeConfig, Formula, FormulaEncoder, FormulaMode};
use crate::logic::normalize::{normalize_word_for_class, normalize_word_for_mix_with};

// ============================================================================
// Decoding Assertions
// ============================================================================

/// Assert that `text` decodes to exactly the given mode, words and counts.
pub fn assert_decodes_to(text: &str, mode: FormulaMode, words: &[&str], counts: &[&str]) {
    let formula = decode(text).unwrap_or_else(|e| panic!("decode('{}') failed: {}", text, e));
    assert_eq!(
        formula,
        Formula::new(
            mode,
            words.iter().map(|w| w.to_string()).collect(),
            counts.iter().map(|c| c.to_string()).collect(),
        ),
        "decode('{}')",
        text
    );
}

/// Assert that `text` is rejected by the decoder.
pub fn assert_unparseable(text: &str) {
    if let Ok(formula) = decode(text) {
        panic!("expected '{}' to be unparseable, got {:?}", text, formula);
    }
}

// ============================================================================
// Round-trip Assertions
// ============================================================================

/// Encode, decode, and check that mode, words and counts survive.
///
/// Returns the encoded text so callers can make further checks on it.
pub fn assert_round_trip(
    config: &EncodeConfig,
    mode: FormulaMode,
    words: &[&str],
    counts: &[&str],
) -> String {
    let encoder = FormulaEncoder::new(config.clone());
    let text = encoder
        .encode(mode, words, counts)
        .unwrap_or_else(|e| panic!("encode({}, {:?}) failed: {}", mode, words, e));
    let decoded = decode(&text).unwrap_or_else(|e| panic!("decode('{}') failed: {}", text, e));

    assert_eq!(decoded.mode, mode, "mode of '{}'", text);
    assert_eq!(decoded.words.len(), words.len(), "word count of '{}'", text);
    for (got, want) in decoded.words.iter().zip(words) {
        assert_eq!(
            canonical_word(config, mode, got),
            canonical_word(config, mode, want),
            "word of '{}'",
            text
        );
    }

    let want_counts: Vec<String> = if mode.count_slots() == 0 {
        Vec::new()
    } else {
        let first = counts.first().map(|c| c.trim()).unwrap_or("");
        let first = if first.is_empty() { config.default_count.as_str() } else { first };
        vec![first.to_string()]
    };
    assert_eq!(decoded.counts, want_counts, "counts of '{}'", text);

    let again = decoded
        .encode_with(config)
        .unwrap_or_else(|e| panic!("re-encode of '{}' failed: {}", text, e));
    assert_eq!(again, text, "decode/encode is not a fixed point");
    text
}

fn canonical_word(config: &EncodeConfig, mode: FormulaMode, word: &str) -> String {
    if mode == FormulaMode::Classification {
        normalize_word_for_class(word)
    } else {
        normalize_word_for_mix_with(word, config.width_variants)
    }
}

// ============================================================================
// Strategies
// ============================================================================

pub mod strategies {
    use proptest::prelude::*;

    /// One alternative: ASCII alphanumerics, full-width letters, kana/kanji, `-`.
    pub fn token() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z0-9]{1,6}",
            "[Ａ-Ｚ０-９]{1,4}",
            "[あ-ん半導体装置]{1,4}",
            "[a-z]{1,3}-[a-z0-9]{1,3}",
        ]
    }

    /// A token, or a parenthesized group of tokens such as `(A+b)`.
    pub fn alternative() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => token(),
            1 => prop::collection::vec(token(), 1..3).prop_map(|t| format!("({})", t.join("+"))),
        ]
    }

    /// A raw mix word: one or more alternatives joined with `+`, sometimes
    /// pasted back with its enclosing parentheses.
    pub fn mix_word() -> impl Strategy<Value = String> {
        let word = prop::collection::vec(alternative(), 1..4).prop_map(|t| t.join("+"));
        (word, any::<bool>()).prop_map(|(w, wrap)| if wrap { format!("({})", w) } else { w })
    }

    /// A classification code such as `H04W12/08`, possibly several joined by `+`.
    pub fn class_code() -> impl Strategy<Value = String> {
        prop::collection::vec("[A-H][0-9]{2}[A-Z][0-9]{1,3}/[0-9]{2}", 1..3)
            .prop_map(|codes| codes.join("+"))
    }

    /// A count as typed, possibly blank.
    pub fn count() -> impl Strategy<Value = String> {
        prop_oneof!["[0-9]{1,3}", Just(String::new())]
    }
}
