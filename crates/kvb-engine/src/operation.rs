use serde::{Deserialize, Serialize};

/// Opaque handle to one engine-side batch allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(u64);

impl ResourceId {
    /// Engines mint ids when allocating resources.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "batch#{}", self.0)
    }
}

/// One pending mutation. Values are already reduced to bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Put { key: String, value: Vec<u8> },
    Delete { key: String },
    /// Erase every key in the store.
    ClearAll,
}

impl Operation {
    pub fn put(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self::Delete { key: key.into() }
    }

    /// The key this operation targets, `None` for `ClearAll`.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Put { key, .. } | Self::Delete { key } => Some(key),
            Self::ClearAll => None,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Put { key, value } => write!(f, "put {key} ({} bytes)", value.len()),
            Self::Delete { key } => write!(f, "delete {key}"),
            Self::ClearAll => write!(f, "clear"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_accessor() {
        assert_eq!(Operation::put("a", b"1".to_vec()).key(), Some("a"));
        assert_eq!(Operation::delete("b").key(), Some("b"));
        assert_eq!(Operation::ClearAll.key(), None);
    }

    #[test]
    fn display_format() {
        assert_eq!(Operation::put("a", vec![1, 2]).to_string(), "put a (2 bytes)");
        assert_eq!(Operation::delete("gone").to_string(), "delete gone");
        assert_eq!(Operation::ClearAll.to_string(), "clear");
        assert_eq!(ResourceId::new(7).to_string(), "batch#7");
    }

    #[test]
    fn operations_serialize_with_variant_names() {
        let json = serde_json::to_string(&Operation::delete("k")).unwrap();
        assert_eq!(json, r#"{"Delete":{"key":"k"}}"#);
        let back: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Operation::delete("k"));
    }
}
