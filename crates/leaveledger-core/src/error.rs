//! Core error types for leaveledger-core.
//!
//! The engine itself is total over its inputs: malformed entry dates are
//! excluded, unknown override keys are inert, and missing fields default.
//! Errors only surface at the serialization boundary.

use thiserror::Error;

/// Core error type for leaveledger-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The serialized plan was not a JSON object.
    #[error("invalid input: expected a JSON object")]
    InvalidInput,

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
