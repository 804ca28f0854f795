use serde::Serialize;

use crate::error::{CodecResult, EncodingError};
use crate::registry::TypeDescriptor;
use crate::scalar::Scalar;

/// A structured value that the object codec can serialize.
///
/// Implemented for every `Serialize + Send + 'static` type. The descriptor
/// always names the concrete type the value was built from.
pub trait ObjectPayload: Send {
    fn descriptor(&self) -> TypeDescriptor;

    /// Append the codec encoding of this value to `out`.
    fn encode_into(&self, out: &mut Vec<u8>) -> bincode::Result<()>;
}

impl<T> ObjectPayload for T
where
    T: Serialize + Send + 'static,
{
    fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::of::<T>()
    }

    fn encode_into(&self, out: &mut Vec<u8>) -> bincode::Result<()> {
        bincode::serialize_into(out, self)
    }
}

/// A type-erased object awaiting encoding.
pub struct ObjectValue {
    payload: Box<dyn ObjectPayload>,
}

impl ObjectValue {
    pub fn new<T>(value: T) -> Self
    where
        T: Serialize + Send + 'static,
    {
        Self {
            payload: Box::new(value),
        }
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        self.payload.descriptor()
    }

    /// Append the `bincode` encoding of the wrapped value to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> bincode::Result<()> {
        self.payload.encode_into(out)
    }
}

impl std::fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectValue")
            .field("type", &self.descriptor().type_name())
            .finish()
    }
}

/// Every shape of value a batch can put.
#[derive(Debug)]
pub enum Value {
    Bytes(Vec<u8>),
    Text(String),
    Int32(i32),
    Int16(i16),
    Bool(bool),
    Float64(f64),
    Float32(f32),
    Int64(i64),
    Object(ObjectValue),
    /// Encoded as one aggregate value, never as separate puts.
    ObjectArray(Vec<ObjectValue>),
}

impl Value {
    /// Wrap a structured value for the object codec.
    pub fn object<T>(value: T) -> Self
    where
        T: Serialize + Send + 'static,
    {
        Self::Object(ObjectValue::new(value))
    }

    /// Wrap a sequence of structured values as a single aggregate.
    pub fn objects<T, I>(values: I) -> Self
    where
        T: Serialize + Send + 'static,
        I: IntoIterator<Item = T>,
    {
        Self::ObjectArray(values.into_iter().map(ObjectValue::new).collect())
    }

    /// Build a text value from raw bytes, rejecting invalid UTF-8.
    pub fn text_from_utf8(bytes: Vec<u8>) -> CodecResult<Self> {
        String::from_utf8(bytes)
            .map(Self::Text)
            .map_err(|e| EncodingError::InvalidText(e.to_string()))
    }

    /// The fixed-width form of this value, if it is a scalar.
    pub fn as_scalar(&self) -> Option<Scalar> {
        match *self {
            Self::Int32(v) => Some(Scalar::Int32(v)),
            Self::Int16(v) => Some(Scalar::Int16(v)),
            Self::Bool(v) => Some(Scalar::Bool(v)),
            Self::Float64(v) => Some(Scalar::Float64(v)),
            Self::Float32(v) => Some(Scalar::Float32(v)),
            Self::Int64(v) => Some(Scalar::Int64(v)),
            _ => None,
        }
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "text",
            Self::Int32(_) => "int32",
            Self::Int16(_) => "int16",
            Self::Bool(_) => "bool",
            Self::Float64(_) => "float64",
            Self::Float32(_) => "float32",
            Self::Int64(_) => "int64",
            Self::Object(_) => "object",
            Self::ObjectArray(_) => "object_array",
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Int32(v) => Self::Int32(v),
            Scalar::Int16(v) => Self::Int16(v),
            Scalar::Bool(v) => Self::Bool(v),
            Scalar::Float64(v) => Self::Float64(v),
            Scalar::Float32(v) => Self::Float32(v),
            Scalar::Int64(v) => Self::Int64(v),
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<ObjectValue> for Value {
    fn from(v: ObjectValue) -> Self {
        Self::Object(v)
    }
}

macro_rules! value_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Scalar::from(v).into()
                }
            }
        )*
    };
}

value_from_scalar!(i32, i16, bool, f64, f32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Account {
        id: u32,
    }

    #[test]
    fn object_descriptor_is_concrete_type() {
        let v = ObjectValue::new(Account { id: 1 });
        assert_eq!(v.descriptor(), TypeDescriptor::of::<Account>());
        assert!(format!("{v:?}").contains("Account"));
    }

    #[test]
    fn conversions_pick_matching_variant() {
        assert!(matches!(Value::from("hi"), Value::Text(_)));
        assert!(matches!(Value::from(vec![1u8]), Value::Bytes(_)));
        assert!(matches!(Value::from(3i16), Value::Int16(3)));
        assert!(matches!(Value::from(true), Value::Bool(true)));
        assert!(matches!(Value::from(7i64), Value::Int64(7)));
    }

    #[test]
    fn as_scalar_only_for_scalars() {
        assert_eq!(Value::from(1.5f32).as_scalar(), Some(Scalar::Float32(1.5)));
        assert!(Value::from("x").as_scalar().is_none());
        assert!(Value::object(Account { id: 2 }).as_scalar().is_none());
    }

    #[test]
    fn objects_builds_one_array_value() {
        let v = Value::objects(vec![Account { id: 1 }, Account { id: 2 }]);
        match v {
            Value::ObjectArray(items) => assert_eq!(items.len(), 2),
            other => panic!("expected array, got {}", other.label()),
        }
    }

    #[test]
    fn invalid_utf8_rejected() {
        let err = Value::text_from_utf8(vec![0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidText(_)));
        assert!(matches!(
            Value::text_from_utf8(b"ok".to_vec()).unwrap(),
            Value::Text(ref s) if s == "ok"
        ));
    }
}
