use thiserror::Error;

use crate::scalar::ScalarKind;

/// Errors produced while reducing a value to its stored byte form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The object codec rejected the concrete type or one of its fields.
    #[error("cannot encode {type_name}: {message}")]
    Codec {
        type_name: &'static str,
        message: String,
    },

    /// The object's concrete type was not registered with the codec.
    #[error("type not registered with the object codec: {0}")]
    Unregistered(&'static str),

    /// Text payload is not valid UTF-8.
    #[error("invalid text: {0}")]
    InvalidText(String),

    /// Stored bytes do not have the width required by the scalar kind.
    #[error("malformed {kind} value: expected {expected} bytes, got {actual}")]
    Malformed {
        kind: ScalarKind,
        expected: usize,
        actual: usize,
    },
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, EncodingError>;
