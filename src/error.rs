//! Error types for the arima-forecast library.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, ArimaError>;

/// Errors that can occur while constructing inputs, fitting, or forecasting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArimaError {
    /// The (p, d, q) order is degenerate or otherwise unusable.
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// Not enough observations for the requested operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The series is constant (zero variance) after differencing, so no
    /// AR/MA structure can be estimated.
    #[error("singular data: series has zero variance after differencing")]
    SingularData,

    /// A forecast parameter is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Input values contain NaN or infinities.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Timestamp-related validation failure.
    #[error("timestamp error: {0}")]
    TimestampError(String),
}
