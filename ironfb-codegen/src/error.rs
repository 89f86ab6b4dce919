//! Error types for code generation.

use thiserror::Error;

/// Error reported by an [`EntityWriter`](crate::writer::EntityWriter) for a
/// single entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// Two entities map to the same module.
    #[error("module '{path}' already written")]
    DuplicateModule {
        /// Module path joined with `::`.
        path: String,
    },

    /// The writer refused the entity.
    #[error("write rejected: {message}")]
    Rejected {
        /// Reason given by the writer.
        message: String,
    },
}

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema loading error.
    #[error("schema error: {0}")]
    Schema(#[from] ironfb_schema::SchemaError),

    /// Saving an entity failed. Generation stops at the first failure.
    #[error("failed to save '{entity}': {source}")]
    Save {
        /// Qualified name of the entity.
        entity: String,
        /// Writer failure.
        #[source]
        source: WriteError,
    },
}
