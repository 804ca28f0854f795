use serde::{Deserialize, Serialize};

use crate::error::{CodecResult, EncodingError};

/// Fixed-width scalar encodings understood by the store.
///
/// All multi-byte kinds are little-endian. `Bool` is a single byte, `0` or `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    Int32,
    Int16,
    Bool,
    Float64,
    Float32,
    Int64,
}

impl ScalarKind {
    /// Encoded width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::Bool => 1,
            Self::Int16 => 2,
            Self::Int32 | Self::Float32 => 4,
            Self::Int64 | Self::Float64 => 8,
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int32 => write!(f, "int32"),
            Self::Int16 => write!(f, "int16"),
            Self::Bool => write!(f, "bool"),
            Self::Float64 => write!(f, "float64"),
            Self::Float32 => write!(f, "float32"),
            Self::Int64 => write!(f, "int64"),
        }
    }
}

/// A numeric or boolean value with its fixed-width encoding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    Int32(i32),
    Int16(i16),
    Bool(bool),
    Float64(f64),
    Float32(f32),
    Int64(i64),
}

impl Scalar {
    /// The fixed-width kind this value encodes as.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Int32(_) => ScalarKind::Int32,
            Self::Int16(_) => ScalarKind::Int16,
            Self::Bool(_) => ScalarKind::Bool,
            Self::Float64(_) => ScalarKind::Float64,
            Self::Float32(_) => ScalarKind::Float32,
            Self::Int64(_) => ScalarKind::Int64,
        }
    }

    /// Little-endian byte form, exactly `self.kind().width()` bytes long.
    pub fn to_bytes(&self) -> Vec<u8> {
        match *self {
            Self::Int32(v) => v.to_le_bytes().to_vec(),
            Self::Int16(v) => v.to_le_bytes().to_vec(),
            Self::Bool(v) => vec![u8::from(v)],
            Self::Float64(v) => v.to_le_bytes().to_vec(),
            Self::Float32(v) => v.to_le_bytes().to_vec(),
            Self::Int64(v) => v.to_le_bytes().to_vec(),
        }
    }

    /// Decode a stored value as the given kind.
    ///
    /// Any non-zero byte decodes as `true` for `Bool`.
    pub fn decode(kind: ScalarKind, bytes: &[u8]) -> CodecResult<Self> {
        let expected = kind.width();
        if bytes.len() != expected {
            return Err(EncodingError::Malformed {
                kind,
                expected,
                actual: bytes.len(),
            });
        }
        let scalar = match kind {
            ScalarKind::Int32 => Self::Int32(i32::from_le_bytes(fixed(bytes))),
            ScalarKind::Int16 => Self::Int16(i16::from_le_bytes(fixed(bytes))),
            ScalarKind::Bool => Self::Bool(bytes[0] != 0),
            ScalarKind::Float64 => Self::Float64(f64::from_le_bytes(fixed(bytes))),
            ScalarKind::Float32 => Self::Float32(f32::from_le_bytes(fixed(bytes))),
            ScalarKind::Int64 => Self::Int64(i64::from_le_bytes(fixed(bytes))),
        };
        Ok(scalar)
    }
}

// Width is checked by the caller.
fn fixed<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

scalar_from! {
    i32 => Int32,
    i16 => Int16,
    bool => Bool,
    f64 => Float64,
    f32 => Float32,
    i64 => Int64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn widths_match_encoded_length() {
        let samples = [
            Scalar::Int32(-7),
            Scalar::Int16(300),
            Scalar::Bool(true),
            Scalar::Float64(2.5),
            Scalar::Float32(-0.25),
            Scalar::Int64(i64::MIN),
        ];
        for s in samples {
            assert_eq!(s.to_bytes().len(), s.kind().width(), "{}", s.kind());
        }
    }

    #[test]
    fn int32_is_little_endian() {
        assert_eq!(Scalar::Int32(42).to_bytes(), vec![42, 0, 0, 0]);
        assert_eq!(Scalar::Int16(0x0102).to_bytes(), vec![0x02, 0x01]);
    }

    #[test]
    fn bool_is_single_byte() {
        assert_eq!(Scalar::Bool(true).to_bytes(), vec![1]);
        assert_eq!(Scalar::Bool(false).to_bytes(), vec![0]);
        assert_eq!(
            Scalar::decode(ScalarKind::Bool, &[0xff]).unwrap(),
            Scalar::Bool(true)
        );
    }

    #[test]
    fn decode_rejects_wrong_width() {
        let err = Scalar::decode(ScalarKind::Int64, &[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            EncodingError::Malformed {
                kind: ScalarKind::Int64,
                expected: 8,
                actual: 3,
            }
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(ScalarKind::Float32.to_string(), "float32");
        assert_eq!(ScalarKind::Int16.to_string(), "int16");
    }

    proptest! {
        #[test]
        fn int64_decodes_to_itself(v in any::<i64>()) {
            let bytes = Scalar::Int64(v).to_bytes();
            prop_assert_eq!(Scalar::decode(ScalarKind::Int64, &bytes).unwrap(), Scalar::Int64(v));
        }

        #[test]
        fn float64_preserves_bits(v in any::<f64>()) {
            let bytes = Scalar::Float64(v).to_bytes();
            match Scalar::decode(ScalarKind::Float64, &bytes).unwrap() {
                Scalar::Float64(back) => prop_assert_eq!(back.to_bits(), v.to_bits()),
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }
}
