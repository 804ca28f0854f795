//! Value encoding for kvbatch.
//!
//! Every value a write batch puts is reduced here to the byte string the
//! store holds. Bytes and text pass through unchanged (text as UTF-8),
//! numeric and boolean values take a fixed-width little-endian form, and
//! structured objects go through the object codec (`bincode`).
//!
//! # Key Types
//!
//! - [`Value`] -- the closed set of value shapes a batch accepts
//! - [`Scalar`] / [`ScalarKind`] -- fixed-width encodings and their decode contract
//! - [`ObjectCodec`] / [`BincodeCodec`] -- object serializer gated by a [`TypeRegistry`]
//! - [`ValueEncoder`] -- encoder owning its own codec, and so its own registry
//! - [`EncodingError`] -- why a value could not be reduced to bytes
//!
//! The encoder never touches store state. Its only side effect is growth of
//! its own type registry.

pub mod codec;
pub mod encoder;
pub mod error;
pub mod registry;
pub mod scalar;
pub mod value;

pub use codec::{BincodeCodec, ObjectCodec};
pub use encoder::ValueEncoder;
pub use error::{CodecResult, EncodingError};
pub use registry::{Registration, TypeDescriptor, TypeRegistry};
pub use scalar::{Scalar, ScalarKind};
pub use value::{ObjectPayload, ObjectValue, Value};
