//! Error types for widget configuration and state changes.

use thiserror::Error;

/// Errors raised by the step dots widget.
///
/// Every variant is recoverable: the rejected mutation leaves the widget in
/// its previous valid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepDotsError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Content has {actual} labels, expected {expected}")]
    ContentLengthMismatch { expected: usize, actual: usize },
    #[error("Selection {position} is outside 0..={dots_num}")]
    SelectionOutOfRange { position: usize, dots_num: usize },
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for widget operations.
pub type StepDotsResult<T> = Result<T, StepDotsError>;

impl From<serde_json::Error> for StepDotsError {
    fn from(err: serde_json::Error) -> Self {
        StepDotsError::Serialization(err.to_string())
    }
}
