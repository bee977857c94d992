//! Text → (mode, words, counts).
//!
//! Shapes are tried in a fixed order and the first one that fits wins:
//!
//! 1. `[…]`: parallel (`[A/TX+B,nN,C/TX]`), then classification (`[X/FT+X/CP]`)
//! 2. a trailing `/TX` (any case) is dropped
//! 3. collection `{A,B,C},nN`
//! 4. serial `{A,nN,B,nN,C}`
//! 5. single `A` or pair `A,nN,B`
//!
//! Anything else is [`DecodeError::Unparseable`].

use once_cell::sync::Lazy;
use regex::Regex;

use super::{DecodeError, Formula, FormulaMode};
use crate::logic::debug::{DebugContext, DebugLevel};
use crate::logic::scan::{
    find_matching_bracket, is_fully_wrapped, split_parallel_side, split_top_level_char,
    strip_one_parenthesis, strip_parentheses, strip_suffix, CP_SUFFIX, FT_SUFFIX, TX_SUFFIX,
};
use crate::{debug_trace, debug_warn};

/// A count slot: digits followed by `N` or `n`.
static COUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)[nN]$").expect("count pattern is valid")
});

/// Digits of a `30N` style count, or `None` if `part` is not a count.
pub fn parse_count(part: &str) -> Option<&str> {
    COUNT_RE
        .captures(part.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn comma_parts(text: &str) -> Vec<&str> {
    split_top_level_char(text, ',')
        .into_iter()
        .map(str::trim)
        .collect()
}

fn words<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts
        .iter()
        .map(|p| strip_parentheses(p).to_string())
        .collect()
}

fn formula(mode: FormulaMode, words: Vec<String>, count: Option<&str>) -> Formula {
    Formula::new(mode, words, count.map(|c| vec![c.to_string()]).unwrap_or_default())
}

/// Decode formula text back into its mode, words and count.
pub fn decode(text: &str) -> Result<Formula, DecodeError> {
    let raw = text.trim();
    let mut ctx = DebugContext::new("decode");
    ctx.add("input", raw);

    let decoded = decode_bracketed(raw)
        .or_else(|| {
            let core = strip_suffix(raw, TX_SUFFIX).unwrap_or(raw);
            ctx.add("core", core);
            decode_collection(core)
                .or_else(|| decode_serial(core))
                .or_else(|| decode_flat(core))
        });

    match decoded {
        Some(formula) => {
            ctx.add("mode", formula.mode.name());
            ctx.debug_dump(DebugLevel::Trace, "decode");
            Ok(formula)
        }
        None => {
            ctx.add("mode", "<none>");
            ctx.debug_dump(DebugLevel::Trace, "decode");
            Err(DecodeError::unparseable(text))
        }
    }
}

/// `[A/TX+B,nN,C/TX]` or `[X/FT+X/CP]`.
fn decode_bracketed(raw: &str) -> Option<Formula> {
    if !(raw.starts_with('[') && raw.ends_with(']') && raw.len() >= 2) {
        return None;
    }
    let inner = raw[1..raw.len() - 1].trim();
    decode_parallel(inner).or_else(|| decode_class(inner))
}

fn decode_parallel(inner: &str) -> Option<Formula> {
    let (left, right) = split_parallel_side(inner)?;
    let left = strip_suffix(left, TX_SUFFIX)?;
    let right = strip_suffix(right, TX_SUFFIX)?;
    debug_trace!("decode", "parallel sides '{}' | '{}'", left, right);

    match comma_parts(right)[..] {
        [b, n, c] => {
            let count = parse_count(n)?;
            let w = words([left, b, c]);
            if w.iter().any(String::is_empty) {
                return None;
            }
            Some(formula(FormulaMode::ParallelTriple, w, Some(count)))
        }
        _ => None,
    }
}

fn decode_class(inner: &str) -> Option<Formula> {
    let parts = split_top_level_char(inner, '+');
    let [ft, cp] = parts[..] else {
        return None;
    };
    let base_ft = strip_suffix(ft, FT_SUFFIX)?;
    let base_cp = strip_suffix(cp, CP_SUFFIX)?;
    if base_ft.is_empty() || base_ft != base_cp {
        debug_trace!("decode", "class bases differ: '{}' vs '{}'", base_ft, base_cp);
        return None;
    }
    Some(formula(
        FormulaMode::Classification,
        vec![strip_one_parenthesis(base_ft).to_string()],
        None,
    ))
}

/// `{A,B,C},nN`
fn decode_collection(core: &str) -> Option<Formula> {
    if !core.starts_with('{') {
        return None;
    }
    let close = find_matching_bracket(core, 0)?;
    let count = parse_count(core[close + 1..].trim().strip_prefix(',')?)?;

    match comma_parts(&core[1..close])[..] {
        [a, b, c] if [a, b, c].iter().all(|p| !strip_parentheses(p).is_empty()) => Some(formula(
            FormulaMode::CollectionTriple,
            words([a, b, c]),
            Some(count),
        )),
        _ => None,
    }
}

/// `{A,nN,B,nN,C}`
fn decode_serial(core: &str) -> Option<Formula> {
    if !is_fully_wrapped(core, '{') {
        return None;
    }
    match comma_parts(&core[1..core.len() - 1])[..] {
        [a, n1, b, n2, c] => {
            let first = parse_count(n1)?;
            let second = parse_count(n2)?;
            if first != second {
                debug_warn!(
                    "decode",
                    "serial formula has two counts ({} and {}), keeping {}",
                    first,
                    second,
                    first
                );
            }
            Some(formula(FormulaMode::SerialTriple, words([a, b, c]), Some(first)))
        }
        _ => None,
    }
}

/// `A` or `A,nN,B`
fn decode_flat(core: &str) -> Option<Formula> {
    match comma_parts(core)[..] {
        [a] if !strip_parentheses(a).is_empty() => {
            Some(formula(FormulaMode::Single, words([a]), None))
        }
        [a, n, b] if !strip_parentheses(a).is_empty() && !strip_parentheses(b).is_empty() => {
            let count = parse_count(n)?;
            Some(formula(FormulaMode::Pair, words([a, b]), Some(count)))
        }
        _ => None,
    }
}
