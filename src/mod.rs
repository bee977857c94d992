//! Encoder, decoder and mix list for `/TX` search formulas.
//!
//! A formula is built from a mode and a few words, e.g. a pair of words
//! within 30 terms of each other becomes `(A+Ａ),30N,(B+Ｂ)/TX`. Formulas are
//! collected in a [`MixStore`] whose selected items are joined with `*` into
//! the final query.

pub mod logic;

#[cfg(test)]
pub mod testing;

// Re-export debug macros at crate level
pub use logic::debug::*;

pub use logic::{
    decode, encode, AddOutcome, DecodeError, EncodeConfig, EncodeError, Formula, FormulaEncoder,
    FormulaError, FormulaMode, MixItem, MixStore, SortOrder, StoreError,
};
