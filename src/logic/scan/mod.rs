//! Bracket-aware scanning over formula text.
//!
//! `(`, `{` and `[` open a nested region, `)`, `}` and `]` close one. A
//! character is *top-level* when no region is open at the moment it is
//! visited. Splitting only ever happens at top level, so separators inside
//! `(A+Ａ)` or `{A,B,C}` are left alone.
//!
//! All positions are byte offsets into the scanned `&str`.


use crate::debug_trace;
use crate::logic::debug::DebugUtils;

/// Field suffix for full-text search.
pub const TX_SUFFIX: &str = "/TX";
/// Field suffix for F-term classification.
pub const FT_SUFFIX: &str = "/FT";
/// Field suffix for CPC classification.
pub const CP_SUFFIX: &str = "/CP";

fn closer_for(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '{' => Some('}'),
        '[' => Some(']'),
        _ => None,
    }
}

fn is_opener(ch: char) -> bool {
    closer_for(ch).is_some()
}

fn is_closer(ch: char) -> bool {
    matches!(ch, ')' | '}' | ']')
}

/// Depth tracker shared by the splitters.
///
/// Stray or mismatched closers are ignored rather than rejected.
#[derive(Debug, Default)]
struct Depth {
    stack: Vec<char>,
}

impl Depth {
    /// Feed one character; returns `true` if it was a bracket.
    fn visit(&mut self, ch: char) -> bool {
        if is_opener(ch) {
            self.stack.push(ch);
            return true;
        }
        if is_closer(ch) {
            if self.stack.last().and_then(|&open| closer_for(open)) == Some(ch) {
                self.stack.pop();
            }
            return true;
        }
        false
    }

    fn is_top_level(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Split `text` on `separator` wherever it occurs at top level.
///
/// `separator` must be exactly one character; otherwise the whole text is
/// returned as the only part. Parts are not trimmed.
pub fn split_top_level<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut chars = separator.chars();
    let sep = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return vec![text],
    };
    split_top_level_char(text, sep)
}

/// Same as [`split_top_level`] for a separator already known to be one char.
pub fn split_top_level_char(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = Depth::default();
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if depth.visit(ch) {
            continue;
        }
        if ch == sep && depth.is_top_level() {
            parts.push(&text[start..i]);
            start = i + ch.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Index of the closer matching the opener at `open_index`.
///
/// Returns `None` when `open_index` is not an opener, when the region is never
/// closed, or when a closer of the wrong kind shows up before the match.
pub fn find_matching_bracket(text: &str, open_index: usize) -> Option<usize> {
    if open_index >= text.len() || !text.is_char_boundary(open_index) {
        return None;
    }
    let open = text[open_index..].chars().next()?;
    closer_for(open)?;

    let mut stack = vec![open];
    for (offset, ch) in text[open_index + open.len_utf8()..].char_indices() {
        if is_opener(ch) {
            stack.push(ch);
        } else if is_closer(ch) {
            match stack.last().and_then(|&o| closer_for(o)) {
                Some(expected) if expected == ch => {
                    stack.pop();
                    if stack.is_empty() {
                        return Some(open_index + open.len_utf8() + offset);
                    }
                }
                _ => {
                    debug_trace!(
                        "scan",
                        "mismatched closer\n{}",
                        DebugUtils::mark_position(text, open_index + open.len_utf8() + offset)
                    );
                    return None;
                }
            }
        }
    }
    None
}

/// Every opener is closed by a closer of its own kind, and no closer is stray.
pub fn is_balanced(text: &str) -> bool {
    let mut stack = Vec::new();
    for ch in text.chars() {
        if let Some(close) = closer_for(ch) {
            stack.push(close);
        } else if is_closer(ch) && stack.pop() != Some(ch) {
            return false;
        }
    }
    stack.is_empty()
}

/// True when `text` starts with an opener whose matching closer is its last char.
pub fn is_fully_wrapped(text: &str, open: char) -> bool {
    text.starts_with(open)
        && text.len() >= 2
        && find_matching_bracket(text, 0) == Some(text.len() - 1)
}

/// Split the inside of a parallel formula at the first top-level `+` that
/// directly follows `/TX` (any case).
///
/// A `+` inside a word such as `(A+Ａ)` is nested and is never chosen; a bare
/// top-level `+` that is not preceded by `/TX` is skipped as well.
pub fn split_parallel_side(inner: &str) -> Option<(&str, &str)> {
    let mut depth = Depth::default();
    for (i, ch) in inner.char_indices() {
        if depth.visit(ch) {
            continue;
        }
        if ch == '+' && depth.is_top_level() && has_suffix(&inner[..i], TX_SUFFIX) {
            debug_trace!("scan", "parallel split\n{}", DebugUtils::mark_position(inner, i));
            return Some((&inner[..i], &inner[i + 1..]));
        }
    }
    None
}

/// Case-insensitive ASCII suffix test, without trimming.
pub fn has_suffix(text: &str, suffix: &str) -> bool {
    let n = suffix.len();
    text.len() >= n
        && text.is_char_boundary(text.len() - n)
        && text[text.len() - n..].eq_ignore_ascii_case(suffix)
}

/// Trim `text`, then remove `suffix` (any case) and trim again.
///
/// Returns `None` if the trimmed text does not end with the suffix.
pub fn strip_suffix<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let text = text.trim();
    if has_suffix(text, suffix) {
        Some(text[..text.len() - suffix.len()].trim())
    } else {
        None
    }
}

/// Remove enclosing `( … )` pairs until the text is no longer fully wrapped.
pub fn strip_parentheses(text: &str) -> &str {
    let mut current = text.trim();
    while is_fully_wrapped(current, '(') {
        current = current[1..current.len() - 1].trim();
    }
    current
}

/// Remove at most one enclosing `( … )` pair.
pub fn strip_one_parenthesis(text: &str) -> &str {
    let text = text.trim();
    if is_fully_wrapped(text, '(') {
        text[1..text.len() - 1].trim()
    } else {
        text
    }
}

/// Does `text` contain `ch` at top level?
pub fn contains_top_level(text: &str, ch: char) -> bool {
    split_top_level_char(text, ch).len() > 1
}
