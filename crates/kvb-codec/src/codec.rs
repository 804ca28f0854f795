use std::any::type_name;
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CodecResult, EncodingError};
use crate::registry::{Registration, TypeDescriptor, TypeRegistry};
use crate::value::ObjectValue;

/// Generic serializer for structured objects.
///
/// Implementations must satisfy these invariants:
/// - `register` is idempotent: registering a type again keeps its first id.
/// - `encode` only accepts objects whose concrete type is registered.
/// - `encode` is deterministic for a fixed registry state.
/// - On error, `encode` leaves `out` as it found it.
pub trait ObjectCodec: Send + Sync {
    /// Short name used in logs and `Debug` output.
    fn name(&self) -> &'static str;

    /// Register a concrete type. Returns its registration id.
    fn register(&self, descriptor: TypeDescriptor) -> u32;

    /// Returns `true` if the type has been registered.
    fn is_registered(&self, descriptor: &TypeDescriptor) -> bool;

    /// All registrations ordered by id.
    fn registrations(&self) -> Vec<Registration>;

    /// Append the encoding of `object` to `out`.
    fn encode(&self, object: &ObjectValue, out: &mut Vec<u8>) -> CodecResult<()>;
}

impl<C: ObjectCodec + ?Sized> ObjectCodec for Arc<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn register(&self, descriptor: TypeDescriptor) -> u32 {
        (**self).register(descriptor)
    }

    fn is_registered(&self, descriptor: &TypeDescriptor) -> bool {
        (**self).is_registered(descriptor)
    }

    fn registrations(&self) -> Vec<Registration> {
        (**self).registrations()
    }

    fn encode(&self, object: &ObjectValue, out: &mut Vec<u8>) -> CodecResult<()> {
        (**self).encode(object, out)
    }
}

/// The default object codec: `bincode` with fixed-width little-endian
/// integers, gated by its own type registry.
///
/// Types with unordered containers (e.g. `HashMap`) only encode
/// deterministically if their iteration order is deterministic.
#[derive(Debug, Default)]
pub struct BincodeCodec {
    registry: RwLock<TypeRegistry>,
}

impl BincodeCodec {
    /// Create a codec with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode bytes produced by this codec as a `T`.
    pub fn decode<T: DeserializeOwned + 'static>(bytes: &[u8]) -> CodecResult<T> {
        bincode::deserialize(bytes).map_err(|e| EncodingError::Codec {
            type_name: type_name::<T>(),
            message: e.to_string(),
        })
    }
}

impl ObjectCodec for BincodeCodec {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn register(&self, descriptor: TypeDescriptor) -> u32 {
        if let Some(existing) = self
            .registry
            .read()
            .expect("lock poisoned")
            .get(&descriptor.type_id())
        {
            return existing.id;
        }
        let (registration, is_new) = self
            .registry
            .write()
            .expect("lock poisoned")
            .register(descriptor);
        if is_new {
            debug!(
                type_name = descriptor.type_name(),
                id = registration.id,
                "registered object type"
            );
        }
        registration.id
    }

    fn is_registered(&self, descriptor: &TypeDescriptor) -> bool {
        self.registry
            .read()
            .expect("lock poisoned")
            .contains(&descriptor.type_id())
    }

    fn registrations(&self) -> Vec<Registration> {
        self.registry.read().expect("lock poisoned").registrations()
    }

    fn encode(&self, object: &ObjectValue, out: &mut Vec<u8>) -> CodecResult<()> {
        let descriptor = object.descriptor();
        if !self.is_registered(&descriptor) {
            return Err(EncodingError::Unregistered(descriptor.type_name()));
        }
        let start = out.len();
        object.encode_into(out).map_err(|e| {
            out.truncate(start);
            EncodingError::Codec {
                type_name: descriptor.type_name(),
                message: e.to_string(),
            }
        })
    }
}
