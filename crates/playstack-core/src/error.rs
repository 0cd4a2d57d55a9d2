//! Error types for the playstack core.

/// Core error type for playstack synthesis.
#[derive(Debug, thiserror::Error)]
pub enum PlaystackError {
    /// Two deployment targets resolved to the same environment name.
    #[error("duplicate environment name: {0} (environment names must be unique)")]
    DuplicateEnvironment(String),

    /// Two construct ids sanitized to the same CloudFormation logical id.
    #[error("duplicate logical id {logical_id:?} in stack {stack_id:?} (from construct id {construct_id:?})")]
    DuplicateLogicalId {
        /// The stack in which the collision occurred.
        stack_id: String,
        /// The colliding logical id after sanitization.
        logical_id: String,
        /// The construct id that produced the collision.
        construct_id: String,
    },

    /// A construct id contained no alphanumeric characters.
    #[error("construct id {0:?} sanitizes to an empty logical id")]
    EmptyLogicalId(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Typed properties failed to render to JSON.
    #[error("failed to serialize template: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Template emission failed.
    #[error("failed to write synth output: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for playstack operations.
pub type PlaystackResult<T> = Result<T, PlaystackError>;
