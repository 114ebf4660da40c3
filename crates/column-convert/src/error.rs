//! Custom error types for column conversion.
//!
//! This module provides the error hierarchy using `thiserror`. Construction
//! errors (an unrecognized type tag) are fatal and surfaced immediately;
//! per-element conversion failures are never errors, they are recovered
//! locally inside the converter as a logged warning plus a null.

use thiserror::Error;

use crate::types::ALLOWED_TYPES;

/// The main error type for conversion operations.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The declared type tag is not one of the recognized values.
    #[error(
        "Unknown type '{received}' received from the detect step, allowed types are {ALLOWED_TYPES:?}"
    )]
    UnknownDetectedType { received: String },

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ConvertError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ConvertError::Polars(e).with_context(context))
    }
}
