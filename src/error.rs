//! Error types for argument extraction.

use thiserror::Error;

/// Errors that can occur while building descriptors or extracting arguments.
///
/// Arguments that match no descriptor, and descriptors that match no argument,
/// are not errors: the former are dropped and the latter fall back to their default.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A descriptor record could not yield a non-empty name.
    #[error("Object type has no name attribute: {value}")]
    NoName { value: String },

    /// A bare type name was not registered at extraction time.
    #[error("Type \"{name}\" not found")]
    TypeNotFound { name: String },

    /// The extracted record did not fit the requested output type.
    #[error("Failed to convert extracted arguments: {0}")]
    Convert(#[from] serde_json::Error),
}

/// Result alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
