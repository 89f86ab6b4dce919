//! Error types for loading a schema model.

use thiserror::Error;

/// Error type for schema loading.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A definition refers to a struct or enum outside the schema.
    #[error("dangling {kind} reference {index} in '{owner}'")]
    DanglingReference {
        /// Kind of the referenced entity (struct or enum).
        kind: &'static str,
        /// Referenced index.
        index: usize,
        /// Name of the referencing definition.
        owner: String,
    },
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
