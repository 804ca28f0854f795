use kvb_codec::EncodingError;
use kvb_engine::EngineError;
use thiserror::Error;

/// Errors from write batch operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// The batch has been closed; open a new one.
    #[error("batch is closed")]
    Closed,

    /// Keys must be non-empty.
    #[error("key must not be empty")]
    EmptyKey,

    /// The value could not be reduced to bytes. The batch is unaffected.
    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    /// The engine could not allocate a batch resource.
    #[error("batch resources exhausted: {open} open, limit {limit}")]
    ResourceExhausted { open: usize, limit: usize },

    /// The engine failed to apply the batch. None of its operations were
    /// applied, and its resource has already been released.
    #[error("storage engine error: {0}")]
    Storage(#[from] EngineError),
}

impl BatchError {
    pub(crate) fn from_allocation(err: EngineError) -> Self {
        match err {
            EngineError::ResourceExhausted { open, limit } => {
                Self::ResourceExhausted { open, limit }
            }
            other => Self::Storage(other),
        }
    }
}

/// Result alias for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;
