use std::sync::Arc;

use kvb_codec::{Value, ValueEncoder};
use kvb_engine::{BatchResource, Operation, StorageEngine};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{BatchError, BatchResult};

/// An ordered set of mutations committed to a storage engine as one unit.
///
/// A batch is open from [`open`](Self::open) until [`close`](Self::close).
/// While open, `put*`, [`delete`](Self::delete) and [`clear`](Self::clear)
/// queue operations in call order. `close` hands them to the engine's atomic
/// apply and releases the engine resource, whether or not the apply
/// succeeded. Every mutation after that, including a second `close`, fails
/// with [`BatchError::Closed`] and has no effect.
///
/// Dropping an open batch discards it: the resource is released and nothing
/// is applied.
///
/// Mutators take `&mut self`. Sharing one batch between threads requires
/// the caller to serialize access; distinct batches are fully independent.
pub struct WriteBatch<E: StorageEngine + ?Sized> {
    resource: Option<BatchResource<E>>,
    encoder: Arc<ValueEncoder>,
}

impl<E: StorageEngine + ?Sized> WriteBatch<E> {
    /// Open a batch, allocating its resource from `engine`.
    ///
    /// Objects put into the batch are encoded with `encoder`, whose type
    /// registry may be shared with other batches.
    pub fn open(engine: Arc<E>, encoder: Arc<ValueEncoder>) -> BatchResult<Self> {
        let resource = BatchResource::allocate(engine).map_err(BatchError::from_allocation)?;
        Ok(Self {
            resource: Some(resource),
            encoder,
        })
    }

    /// Returns `true` until the batch is closed.
    pub fn is_open(&self) -> bool {
        self.resource.is_some()
    }

    /// Queue a put of any supported value.
    pub fn put(&mut self, key: &str, value: impl Into<Value>) -> BatchResult<()> {
        self.ensure_open()?;
        check_key(key)?;
        let value = value.into();
        let bytes = self.encoder.encode(&value)?;
        self.append(Operation::put(key, bytes))
    }

    /// Queue a put of raw bytes, stored unchanged.
    pub fn put_bytes(&mut self, key: &str, bytes: &[u8]) -> BatchResult<()> {
        self.put(key, bytes)
    }

    /// Queue a put of text, stored as UTF-8.
    pub fn put_text(&mut self, key: &str, text: &str) -> BatchResult<()> {
        self.put(key, text)
    }

    /// Queue a put of a 4-byte little-endian `i32`.
    pub fn put_int(&mut self, key: &str, value: i32) -> BatchResult<()> {
        self.put(key, value)
    }

    /// Queue a put of a 2-byte little-endian `i16`.
    pub fn put_short(&mut self, key: &str, value: i16) -> BatchResult<()> {
        self.put(key, value)
    }

    /// Queue a put of a one-byte boolean.
    pub fn put_bool(&mut self, key: &str, value: bool) -> BatchResult<()> {
        self.put(key, value)
    }

    /// Queue a put of an 8-byte little-endian `f64`.
    pub fn put_double(&mut self, key: &str, value: f64) -> BatchResult<()> {
        self.put(key, value)
    }

    /// Queue a put of a 4-byte little-endian `f32`.
    pub fn put_float(&mut self, key: &str, value: f32) -> BatchResult<()> {
        self.put(key, value)
    }

    /// Queue a put of an 8-byte little-endian `i64`.
    pub fn put_long(&mut self, key: &str, value: i64) -> BatchResult<()> {
        self.put(key, value)
    }

    /// Queue a put of a structured object through the object codec.
    pub fn put_object<T>(&mut self, key: &str, value: T) -> BatchResult<()>
    where
        T: Serialize + Send + 'static,
    {
        self.put(key, Value::object(value))
    }

    /// Queue a put of a sequence of objects, stored as one value.
    pub fn put_objects<T, I>(&mut self, key: &str, values: I) -> BatchResult<()>
    where
        T: Serialize + Send + 'static,
        I: IntoIterator<Item = T>,
    {
        self.put(key, Value::objects(values))
    }

    /// Queue a delete. Whether the key exists is decided at apply time.
    pub fn delete(&mut self, key: &str) -> BatchResult<()> {
        self.ensure_open()?;
        check_key(key)?;
        self.append(Operation::delete(key))
    }

    /// Queue an erase of the whole store.
    ///
    /// Operations queued after the clear still apply after it.
    pub fn clear(&mut self) -> BatchResult<()> {
        self.ensure_open()?;
        self.append(Operation::ClearAll)
    }

    /// Commit all queued operations atomically and close the batch.
    ///
    /// Blocks until the engine has applied the batch. On
    /// [`BatchError::Storage`] nothing was applied; the batch is closed
    /// either way.
    pub fn close(&mut self) -> BatchResult<()> {
        let resource = self.resource.take().ok_or(BatchError::Closed)?;
        let ops = resource.len();
        match resource.commit() {
            Ok(()) => {
                debug!(ops, "write batch committed");
                Ok(())
            }
            Err(e) => {
                warn!(ops, error = %e, "write batch failed to apply");
                Err(BatchError::Storage(e))
            }
        }
    }

    /// Number of queued operations; zero once closed.
    pub fn len(&self) -> usize {
        self.resource.as_ref().map_or(0, |r| r.len())
    }

    /// Returns `true` if no operation is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queued operations in accumulation order.
    pub fn pending(&self) -> BatchResult<&[Operation]> {
        self.resource
            .as_ref()
            .map(|r| r.operations())
            .ok_or(BatchError::Closed)
    }

    /// The encoder values are reduced with.
    pub fn encoder(&self) -> &Arc<ValueEncoder> {
        &self.encoder
    }

    fn ensure_open(&self) -> BatchResult<()> {
        if self.resource.is_none() {
            return Err(BatchError::Closed);
        }
        Ok(())
    }

    fn append(&mut self, op: Operation) -> BatchResult<()> {
        let resource = self.resource.as_mut().ok_or(BatchError::Closed)?;
        resource.push(op);
        Ok(())
    }
}

impl<E: StorageEngine + ?Sized> std::fmt::Debug for WriteBatch<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteBatch")
            .field("open", &self.is_open())
            .field("pending", &self.len())
            .finish()
    }
}

fn check_key(key: &str) -> BatchResult<()> {
    if key.is_empty() {
        return Err(BatchError::EmptyKey);
    }
    Ok(())
}
