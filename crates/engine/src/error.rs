use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the assessment engine.
///
/// Zero extracted clauses is deliberately *not* an error: it is a valid
/// terminal state surfaced through `Assessment::manual_review`.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The comparator needs at least two assessments.
    #[error("comparison requires at least 2 assessments, got {0}")]
    InsufficientInput(usize),
}
