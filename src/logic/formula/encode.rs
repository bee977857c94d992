use super::{EncodeConfig, EncodeError, FormulaMode};
use crate::logic::normalize::{normalize_word_for_class, normalize_word_for_mix_with, to_half_width};
use crate::logic::scan::{
    contains_top_level, is_balanced, is_fully_wrapped, CP_SUFFIX, FT_SUFFIX, TX_SUFFIX,
};
use crate::{debug_debug, debug_trace};

/// Separator that joins formulas in the final output.
pub const OUTPUT_SEPARATOR: char = '*';

/// Builds canonical formula text from raw form input.
#[derive(Debug, Clone, Default)]
pub struct FormulaEncoder {
    config: EncodeConfig,
}

impl FormulaEncoder {
    pub fn new(config: EncodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncodeConfig {
        &self.config
    }

    /// Encode `words` and `counts` in the shape of `mode`.
    ///
    /// `words` must hold exactly `mode.word_slots()` entries, none blank.
    /// Only the first count is used; a missing or blank count falls back to
    /// the configured default. Counts are ignored by modes without one.
    pub fn encode<S: AsRef<str>>(
        &self,
        mode: FormulaMode,
        words: &[S],
        counts: &[S],
    ) -> Result<String, EncodeError> {
        if words.len() != mode.word_slots() {
            return Err(EncodeError::WordCount {
                mode,
                expected: mode.word_slots(),
                got: words.len(),
            });
        }
        if let Some(slot) = words.iter().position(|w| w.as_ref().trim().is_empty()) {
            return Err(EncodeError::EmptyWord { slot });
        }

        let text = match mode {
            FormulaMode::Classification => self.encode_class(words[0].as_ref())?,
            FormulaMode::Single => {
                let w = self.mix_words(words)?;
                format!("{}{}", w[0], TX_SUFFIX)
            }
            FormulaMode::Pair => {
                let (w, n) = self.mix_parts(words, counts)?;
                format!("{},{},{}{}", w[0], n, w[1], TX_SUFFIX)
            }
            FormulaMode::SerialTriple => {
                let (w, n) = self.mix_parts(words, counts)?;
                format!("{{{},{},{},{},{}}}{}", w[0], n, w[1], n, w[2], TX_SUFFIX)
            }
            FormulaMode::CollectionTriple => {
                let (w, n) = self.mix_parts(words, counts)?;
                format!("{{{},{},{}}},{}{}", w[0], w[1], w[2], n, TX_SUFFIX)
            }
            FormulaMode::ParallelTriple => {
                let (w, n) = self.mix_parts(words, counts)?;
                format!("[{}{tx}+{},{},{}{tx}]", w[0], w[1], n, w[2], tx = TX_SUFFIX)
            }
        };

        debug_debug!("encode", "{} -> {}", mode, text);
        Ok(text)
    }

    fn mix_parts<S: AsRef<str>>(
        &self,
        words: &[S],
        counts: &[S],
    ) -> Result<(Vec<String>, String), EncodeError> {
        let w = self.mix_words(words)?;
        let n = self.count(counts.first().map(|c| c.as_ref()))?;
        Ok((w, n))
    }

    fn mix_words<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<String>, EncodeError> {
        words
            .iter()
            .enumerate()
            .map(|(slot, raw)| {
                let word = normalize_word_for_mix_with(raw.as_ref(), self.config.width_variants);
                check_word(slot, word)
            })
            .collect()
    }

    /// `[X/FT+X/CP]`, with `X` parenthesized when it joins several codes.
    fn encode_class(&self, raw: &str) -> Result<String, EncodeError> {
        let code = check_word(0, normalize_word_for_class(raw))?;
        let code = if contains_top_level(&code, '+') && !is_fully_wrapped(&code, '(') {
            debug_trace!("encode", "wrapping class code '{}'", code);
            format!("({})", code)
        } else {
            code
        };
        Ok(format!("[{c}{}+{c}{}]", FT_SUFFIX, CP_SUFFIX, c = code))
    }

    /// Render a count as `<digits>N`.
    fn count(&self, raw: Option<&str>) -> Result<String, EncodeError> {
        let folded = raw.map(to_half_width).unwrap_or_default();
        let digits = match folded.trim() {
            "" => self.config.default_count.trim(),
            value => value,
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EncodeError::InvalidCount {
                value: digits.to_string(),
            });
        }
        Ok(format!("{}N", digits))
    }
}

fn check_word(slot: usize, word: String) -> Result<String, EncodeError> {
    if word.is_empty() {
        return Err(EncodeError::EmptyWord { slot });
    }
    if word.contains(OUTPUT_SEPARATOR) {
        return Err(EncodeError::ForbiddenSeparator { slot });
    }
    if !is_balanced(&word) {
        return Err(EncodeError::UnbalancedBrackets { slot });
    }
    Ok(word)
}

/// Encode with the default (width-expanding) configuration.
pub fn encode<S: AsRef<str>>(
    mode: FormulaMode,
    words: &[S],
    counts: &[S],
) -> Result<String, EncodeError> {
    FormulaEncoder::default().encode(mode, words, counts)
}
