use thiserror::Error;

/// Result type for rule configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating rule configuration.
///
/// All of these are fatal: a rule set that fails validation must not be
/// used for assessment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Category weights must sum to exactly 100 points.
    #[error("category weights must sum to 100, got {0}")]
    WeightSum(u32),

    /// A configuration key does not name a known category.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A category has no rule entry.
    #[error("missing category: {0}")]
    MissingCategory(&'static str),

    /// A category has an empty positive keyword list.
    #[error("empty keyword list for category: {0}")]
    EmptyKeywords(&'static str),

    /// The minimum match threshold cannot be zero.
    #[error("minimum match threshold must be at least 1 for category: {0}")]
    ZeroThreshold(&'static str),

    /// The expected reference clause count must be positive.
    #[error("expected clause count must be positive for category: {0}")]
    NonPositiveExpected(&'static str),

    /// A lock-in mechanism has an empty pattern list.
    #[error("empty pattern list for mechanism: {0}")]
    EmptyMechanismPatterns(String),

    /// Two mechanisms share the same name.
    #[error("duplicate mechanism: {0}")]
    DuplicateMechanism(String),

    /// The TOML document could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
