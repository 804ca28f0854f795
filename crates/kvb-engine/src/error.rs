use thiserror::Error;

use crate::operation::ResourceId;

/// Errors from storage engine operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No more batch resources can be allocated.
    #[error("batch resources exhausted: {open} open, limit {limit}")]
    ResourceExhausted { open: usize, limit: usize },

    /// The resource was never allocated or has already been released.
    #[error("unknown batch resource: {0}")]
    UnknownResource(ResourceId),

    /// An operation in the batch is not acceptable to the engine.
    #[error("invalid operation at index {index}: {reason}")]
    InvalidOperation { index: usize, reason: String },

    /// A put value exceeds the configured size limit.
    #[error("value for key {key:?} is {size} bytes, limit {limit}")]
    ValueTooLarge {
        key: String,
        size: usize,
        limit: usize,
    },

    /// The engine could not apply the batch.
    #[error("apply failed: {0}")]
    ApplyFailed(String),

    /// Engine configuration could not be loaded or is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
