//! Word normalization for formula slots.
//!
//! Users type words in either half-width (`ABC`) or full-width (`ＡＢＣ`) form
//! and downstream indexes may store either. Mix words are therefore expanded
//! into every width variant and put into a canonical order; classification
//! codes are only half-width folded.


use crate::debug_trace;
use crate::logic::scan::{contains_top_level, split_top_level_char, strip_parentheses};
use std::cmp::Ordering;

/// Distance between a printable ASCII char and its full-width form.
const WIDTH_OFFSET: u32 = 0xFEE0;
const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Fold full-width ASCII forms (`！`..`～`) and the ideographic space to ASCII.
pub fn to_half_width(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(ch as u32 - WIDTH_OFFSET).unwrap_or(ch),
            IDEOGRAPHIC_SPACE => ' ',
            _ => ch,
        })
        .collect()
}

/// Map printable ASCII (`!`..`~`) and space to their full-width forms.
pub fn to_full_width(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '!'..='~' => char::from_u32(ch as u32 + WIDTH_OFFSET).unwrap_or(ch),
            ' ' => IDEOGRAPHIC_SPACE,
            _ => ch,
        })
        .collect()
}

/// True iff `token` is non-empty and made of `0-9A-Za-z` only.
pub fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Canonical token order: longer first (counted in chars), then ascending.
pub fn token_order(a: &str, b: &str) -> Ordering {
    b.chars()
        .count()
        .cmp(&a.chars().count())
        .then_with(|| a.cmp(b))
}

/// Normalize one word slot of a mix formula, expanding width variants.
///
/// See [`normalize_word_for_mix_with`].
pub fn normalize_word_for_mix(raw: &str) -> String {
    normalize_word_for_mix_with(raw, true)
}

/// Normalize one word slot of a mix formula.
///
/// The word is half-width folded and split on top-level `+` into
/// alternatives; parenthesized groups such as `(A+B)` are flattened into the
/// surrounding alternatives. Each alphanumeric alternative also contributes
/// its full-width form when `width_variants` is set. Alternatives are sorted
/// with [`token_order`] and deduplicated; more than one alternative is
/// rendered as `(a+b+…)`. A blank word normalizes to the empty string.
pub fn normalize_word_for_mix_with(raw: &str, width_variants: bool) -> String {
    let half = to_half_width(raw);
    let mut tokens: Vec<&str> = Vec::new();
    collect_alternatives(&half, &mut tokens);
    if tokens.is_empty() {
        return String::new();
    }
    tokens.sort_by(|a, b| token_order(a, b));

    let mut expanded: Vec<String> = Vec::with_capacity(tokens.len() * 2);
    for token in tokens {
        expanded.push(token.to_string());
        if width_variants && is_alphanumeric(token) {
            expanded.push(to_full_width(token));
        }
    }
    expanded.sort_by(|a, b| token_order(a, b));
    expanded.dedup();

    debug_trace!("normalize", "'{}' -> {:?}", raw, expanded);

    match expanded.len() {
        0 => String::new(),
        1 => expanded.remove(0),
        _ => format!("({})", expanded.join("+")),
    }
}

/// Push the non-empty alternatives of `text`, unwrapping `( … )` groups.
fn collect_alternatives<'a>(text: &'a str, out: &mut Vec<&'a str>) {
    for part in split_top_level_char(text, '+') {
        let part = strip_parentheses(part);
        if part.is_empty() {
            continue;
        }
        if contains_top_level(part, '+') {
            collect_alternatives(part, out);
        } else {
            out.push(part);
        }
    }
}

/// Normalize a classification code: half-width fold and trim only.
///
/// `+` inside a classification code joins separate symbols, so the order is
/// kept as typed.
pub fn normalize_word_for_class(raw: &str) -> String {
    to_half_width(raw).trim().to_string()
}
