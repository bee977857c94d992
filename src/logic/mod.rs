pub mod scan;
pub mod normalize;

pub mod debug;
pub mod formula;

pub mod store;

pub use formula::{
    config::EncodeConfig,
    decode::decode,
    encode::{encode, FormulaEncoder},
    error::{DecodeError, EncodeError, FormulaError},
    Formula, FormulaMode,
};
pub use normalize::{normalize_word_for_class, normalize_word_for_mix};
pub use store::{AddOutcome, MixItem, MixStore, SortOrder, StoreError};
