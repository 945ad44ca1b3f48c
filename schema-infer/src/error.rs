//! Error types for column type inference.
//!
//! Only sampler-level and setup-level faults surface as errors. A cascade rule
//! that does not match is ordinary control flow and never produces one.

use thiserror::Error;

/// A type alias for `Result<T, InferenceError>`.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Errors raised while classifying a column.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The column has no non-null values, so there is nothing to sample.
    #[error("Column '{column}' has no non-null values")]
    EmptyColumn {
        /// Name of the empty column
        column: String,
    },

    /// Sampling the column failed unexpectedly.
    #[error("Failed to sample column '{column}': {message}")]
    Sampling {
        /// Name of the column being sampled
        column: String,
        /// Detailed error message
        message: String,
    },

    /// The inference configuration is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A column arrived in a physical type the engine cannot render.
    #[error("Unsupported type for column '{column}': {data_type}")]
    UnsupportedType { column: String, data_type: String },

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl InferenceError {
    /// Creates an empty column error for the named column.
    pub fn empty_column(column: impl Into<String>) -> Self {
        Self::EmptyColumn {
            column: column.into(),
        }
    }

    /// Creates a sampling error for the named column.
    pub fn sampling(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Sampling {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(column: impl Into<String>, data_type: impl ToString) -> Self {
        Self::UnsupportedType {
            column: column.into(),
            data_type: data_type.to_string(),
        }
    }

    /// Returns true if this error reports a column without usable values.
    pub fn is_empty_column(&self) -> bool {
        matches!(self, Self::EmptyColumn { .. })
    }
}

/// Converts serde_json errors to InferenceError.
impl From<serde_json::Error> for InferenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
