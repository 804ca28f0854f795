use serde::de::DeserializeOwned;

use crate::codec::{BincodeCodec, ObjectCodec};
use crate::error::CodecResult;
use crate::registry::{Registration, TypeDescriptor};
use crate::scalar::Scalar;
use crate::value::{ObjectValue, Value};

/// Reduces values to the byte strings a store accepts.
///
/// Objects are handed to an [`ObjectCodec`], [`BincodeCodec`] unless another
/// is injected with [`with_codec`](Self::with_codec). Each encoder owns its
/// codec and so its own type registry. An object's concrete type is
/// registered with the codec before every encode, so types need not be
/// registered up front.
pub struct ValueEncoder {
    codec: Box<dyn ObjectCodec>,
}

impl ValueEncoder {
    /// Create an encoder backed by a fresh [`BincodeCodec`].
    pub fn new() -> Self {
        Self::with_codec(BincodeCodec::new())
    }

    /// Create an encoder backed by `codec`.
    pub fn with_codec(codec: impl ObjectCodec + 'static) -> Self {
        Self {
            codec: Box::new(codec),
        }
    }

    /// Register `T` ahead of its first encode. Returns its registration id.
    pub fn register<T: ?Sized + 'static>(&self) -> u32 {
        self.register_descriptor(TypeDescriptor::of::<T>())
    }

    /// Register a descriptor. Re-registering keeps the first id.
    pub fn register_descriptor(&self, descriptor: TypeDescriptor) -> u32 {
        self.codec.register(descriptor)
    }

    /// Returns `true` if `T` has been registered, explicitly or by an encode.
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.codec.is_registered(&TypeDescriptor::of::<T>())
    }

    /// Snapshot of all registrations ordered by id.
    pub fn registered_types(&self) -> Vec<Registration> {
        self.codec.registrations()
    }

    /// Raw bytes are stored unchanged.
    pub fn encode_bytes(&self, bytes: &[u8]) -> Vec<u8> {
        bytes.to_vec()
    }

    /// Text is stored as its UTF-8 bytes.
    pub fn encode_text(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }

    /// Fixed-width little-endian form of `scalar`.
    pub fn encode_scalar(&self, scalar: Scalar) -> Vec<u8> {
        scalar.to_bytes()
    }

    /// Encode one object, registering its concrete type if needed.
    ///
    /// On failure nothing but the registry has changed.
    pub fn encode_object(&self, object: &ObjectValue) -> CodecResult<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_object_into(object, &mut out)?;
        Ok(out)
    }

    /// Encode a sequence of objects as one aggregate value.
    ///
    /// Layout is a `u64` little-endian element count followed by each
    /// element's encoding. With the bincode codec these are the same bytes
    /// `bincode` produces for a `Vec<T>`.
    pub fn encode_objects(&self, objects: &[ObjectValue]) -> CodecResult<Vec<u8>> {
        let mut out = Vec::with_capacity(8);
        out.extend_from_slice(&(objects.len() as u64).to_le_bytes());
        for object in objects {
            self.encode_object_into(object, &mut out)?;
        }
        Ok(out)
    }

    /// Reduce any value to its stored byte form.
    pub fn encode(&self, value: &Value) -> CodecResult<Vec<u8>> {
        match value {
            Value::Bytes(bytes) => Ok(self.encode_bytes(bytes)),
            Value::Text(text) => Ok(self.encode_text(text)),
            Value::Int32(v) => Ok(self.encode_scalar(Scalar::Int32(*v))),
            Value::Int16(v) => Ok(self.encode_scalar(Scalar::Int16(*v))),
            Value::Bool(v) => Ok(self.encode_scalar(Scalar::Bool(*v))),
            Value::Float64(v) => Ok(self.encode_scalar(Scalar::Float64(*v))),
            Value::Float32(v) => Ok(self.encode_scalar(Scalar::Float32(*v))),
            Value::Int64(v) => Ok(self.encode_scalar(Scalar::Int64(*v))),
            Value::Object(object) => self.encode_object(object),
            Value::ObjectArray(objects) => self.encode_objects(objects),
        }
    }

    /// Decode bytes produced by [`encode_object`](Self::encode_object)
    /// with the default bincode codec.
    pub fn decode_object<T: DeserializeOwned + 'static>(&self, bytes: &[u8]) -> CodecResult<T> {
        BincodeCodec::decode(bytes)
    }

    /// Decode bytes produced by [`encode_objects`](Self::encode_objects)
    /// with the default bincode codec.
    pub fn decode_objects<T>(&self, bytes: &[u8]) -> CodecResult<Vec<T>>
    where
        T: DeserializeOwned + 'static,
    {
        BincodeCodec::decode(bytes)
    }

    fn encode_object_into(&self, object: &ObjectValue, out: &mut Vec<u8>) -> CodecResult<()> {
        self.codec.register(object.descriptor());
        self.codec.encode(object, out)
    }
}

impl Default for ValueEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValueEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueEncoder")
            .field("codec", &self.codec.name())
            .field("registered_types", &self.codec.registrations().len())
            .finish()
    }
}
