use std::fmt;

use super::FormulaMode;
use crate::logic::store::StoreError;

/// Input rejected by the encoder. Nothing is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Word slot `slot` (0-based) is blank after trimming and normalization.
    EmptyWord { slot: usize },
    /// The mode needs a different number of words.
    WordCount {
        mode: FormulaMode,
        expected: usize,
        got: usize,
    },
    /// A count is not a non-negative decimal integer.
    InvalidCount { value: String },
    /// Word slot `slot` contains the `*` that joins formulas in the output.
    ForbiddenSeparator { slot: usize },
    /// Word slot `slot` has an unclosed or stray bracket.
    UnbalancedBrackets { slot: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::EmptyWord { slot } => write!(f, "word {} is empty", slot + 1),
            EncodeError::WordCount {
                mode,
                expected,
                got,
            } => write!(f, "{} takes {} word(s), got {}", mode, expected, got),
            EncodeError::InvalidCount { value } => {
                write!(f, "count '{}' is not a non-negative integer", value)
            }
            EncodeError::ForbiddenSeparator { slot } => {
                write!(f, "word {} contains the output separator '*'", slot + 1)
            }
            EncodeError::UnbalancedBrackets { slot } => {
                write!(f, "word {} has unbalanced brackets", slot + 1)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Text that matches none of the formula shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    Unparseable { text: String },
}

impl DecodeError {
    pub fn unparseable(text: impl Into<String>) -> Self {
        DecodeError::Unparseable { text: text.into() }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Unparseable { text } => write!(f, "unparseable formula: {}", text),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Any failure surfaced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    Encode(EncodeError),
    Decode(DecodeError),
    Store(StoreError),
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::Encode(e) => write!(f, "{}", e),
            FormulaError::Decode(e) => write!(f, "{}", e),
            FormulaError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FormulaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormulaError::Encode(e) => Some(e),
            FormulaError::Decode(e) => Some(e),
            FormulaError::Store(e) => Some(e),
        }
    }
}

impl From<EncodeError> for FormulaError {
    fn from(e: EncodeError) -> Self {
        FormulaError::Encode(e)
    }
}

impl From<DecodeError> for FormulaError {
    fn from(e: DecodeError) -> Self {
        FormulaError::Decode(e)
    }
}

impl From<StoreError> for FormulaError {
    fn from(e: StoreError) -> Self {
        FormulaError::Store(e)
    }
}
