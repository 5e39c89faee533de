//! Error types for the parsing layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps lopdf and I/O failures and converts them to [`MetricsError`].

use cidmetrics_core::MetricsError;
use thiserror::Error;

/// Error type for font dictionary and document operations.
///
/// Wraps backend-specific errors and provides conversion to [`MetricsError`]
/// for unified error handling across the library.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading or writing PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error resolving font dictionary information.
    #[error("font error: {0}")]
    Font(String),

    /// A metrics decoding error.
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

impl From<lopdf::Error> for BackendError {
    fn from(err: lopdf::Error) -> Self {
        BackendError::Parse(err.to_string())
    }
}

impl From<BackendError> for MetricsError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => MetricsError::ParseError(msg),
            BackendError::Io(e) => MetricsError::IoError(e.to_string()),
            BackendError::Font(msg) => MetricsError::FontError(msg),
            BackendError::Metrics(e) => e,
        }
    }
}
