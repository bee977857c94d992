//! Search formulas: the six canonical shapes and their text form.
//!
//! | mode         | text                       |
//! |--------------|----------------------------|
//! | `single`     | `W/TX`                     |
//! | `pair`       | `W,nN,W/TX`                |
//! | `serial`     | `{W,nN,W,nN,W}/TX`         |
//! | `collection` | `{W,W,W},nN/TX`            |
//! | `parallel`   | `[W/TX+W,nN,W/TX]`         |
//! | `class`      | `[X/FT+X/CP]`              |
//!
//! [`encode`] builds the text from raw words, [`decode`] recovers the mode,
//! words and counts from any text in one of these shapes.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;

#[cfg(test)]
mod tests;

pub use config::EncodeConfig;
pub use decode::decode;
pub use encode::{encode, FormulaEncoder};
pub use error::{DecodeError, EncodeError, FormulaError};

use std::fmt;
use std::str::FromStr;

/// The grammatical shape of a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaMode {
    /// `W/TX`
    Single,
    /// `W,nN,W/TX`
    Pair,
    /// `{W,nN,W,nN,W}/TX`, one count shared by both gaps
    SerialTriple,
    /// `{W,W,W},nN/TX`
    CollectionTriple,
    /// `[W/TX+W,nN,W/TX]`
    ParallelTriple,
    /// `[X/FT+X/CP]`
    Classification,
}

impl FormulaMode {
    pub const ALL: [FormulaMode; 6] = [
        FormulaMode::Single,
        FormulaMode::Pair,
        FormulaMode::SerialTriple,
        FormulaMode::CollectionTriple,
        FormulaMode::ParallelTriple,
        FormulaMode::Classification,
    ];

    /// Number of words the mode carries.
    pub fn word_slots(self) -> usize {
        match self {
            FormulaMode::Single | FormulaMode::Classification => 1,
            FormulaMode::Pair => 2,
            FormulaMode::SerialTriple
            | FormulaMode::CollectionTriple
            | FormulaMode::ParallelTriple => 3,
        }
    }

    /// Number of counts the mode carries (0 or 1).
    pub fn count_slots(self) -> usize {
        match self {
            FormulaMode::Single | FormulaMode::Classification => 0,
            _ => 1,
        }
    }

    /// Count a form pre-fills for this mode, if it has a count.
    pub fn default_count(self) -> Option<&'static str> {
        match self {
            FormulaMode::Single | FormulaMode::Classification => None,
            FormulaMode::ParallelTriple => Some("5"),
            _ => Some("30"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FormulaMode::Single => "single",
            FormulaMode::Pair => "pair",
            FormulaMode::SerialTriple => "serial",
            FormulaMode::CollectionTriple => "collection",
            FormulaMode::ParallelTriple => "parallel",
            FormulaMode::Classification => "class",
        }
    }
}

impl fmt::Display for FormulaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormulaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FormulaMode::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = FormulaMode::ALL.iter().map(|m| m.name()).collect();
                format!("unknown mode '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// A decoded formula: what a form needs to be filled back in.
///
/// Words are shown without their enclosing parentheses; counts are the bare
/// digits without the `N` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    pub mode: FormulaMode,
    pub words: Vec<String>,
    pub counts: Vec<String>,
}

impl Formula {
    pub fn new(mode: FormulaMode, words: Vec<String>, counts: Vec<String>) -> Self {
        Self {
            mode,
            words,
            counts,
        }
    }

    /// Re-run the encoder on the decoded words and counts.
    pub fn encode_with(&self, config: &EncodeConfig) -> Result<String, EncodeError> {
        FormulaEncoder::new(config.clone()).encode(self.mode, &self.words, &self.counts)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.mode, self.words.join(" | "))?;
        if !self.counts.is_empty() {
            write!(f, " ; n = {}", self.counts.join(", "))?;
        }
        Ok(())
    }
}
