//! Atomic write batches for kvbatch.
//!
//! A [`WriteBatch`] accumulates puts, deletes and clears against one engine
//! resource and commits them together on [`WriteBatch::close`]. Values are
//! reduced to bytes by an injected [`ValueEncoder`]; the engine applies the
//! ordered operation list atomically.
//!
//! ```
//! use std::sync::Arc;
//!
//! use kvb_batch::{ValueEncoder, WriteBatch};
//! use kvb_engine::InMemoryEngine;
//!
//! let engine = Arc::new(InMemoryEngine::new());
//! let encoder = Arc::new(ValueEncoder::new());
//!
//! let mut batch = WriteBatch::open(Arc::clone(&engine), encoder).unwrap();
//! batch.put("greeting", "hello").unwrap();
//! batch.put_int("answer", 42).unwrap();
//! batch.delete("stale").unwrap();
//! batch.close().unwrap();
//!
//! assert_eq!(engine.get("greeting"), Some(b"hello".to_vec()));
//! assert_eq!(engine.get("answer"), Some(42i32.to_le_bytes().to_vec()));
//! ```

pub mod batch;
pub mod error;

pub use batch::WriteBatch;
pub use error::{BatchError, BatchResult};
pub use kvb_codec::{Value, ValueEncoder};
