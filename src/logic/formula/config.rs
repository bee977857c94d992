//! Encoder configuration

/// Count used when a count field is left blank.
pub const DEFAULT_COUNT: &str = "1";

/// Encoder configuration parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeConfig {
    /// Add the full-width form of every alphanumeric alternative
    ///
    /// On: `ABC` becomes `(ABC+ＡＢＣ)`
    /// Off: `ABC` stays `ABC`
    pub width_variants: bool,

    /// Count written when the caller leaves a count blank
    pub default_count: String,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            width_variants: true,
            default_count: DEFAULT_COUNT.to_string(),
        }
    }
}

impl EncodeConfig {
    /// Width-expanding configuration, the one stored formulas are built with
    pub fn canonical() -> Self {
        Self::default()
    }

    /// Words are folded and sorted but not width-expanded
    pub fn literal() -> Self {
        Self {
            width_variants: false,
            ..Self::default()
        }
    }
}
