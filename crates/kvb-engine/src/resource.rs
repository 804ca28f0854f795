use std::sync::Arc;

use tracing::debug;

use crate::error::EngineResult;
use crate::operation::{Operation, ResourceId};
use crate::traits::StorageEngine;

/// An engine-side batch allocation plus the operations queued against it.
///
/// The resource is released exactly once: by [`commit`](Self::commit), or on
/// drop if the batch is discarded. The raw id never leaves this type.
pub struct BatchResource<E: StorageEngine + ?Sized> {
    engine: Arc<E>,
    id: ResourceId,
    operations: Vec<Operation>,
    released: bool,
}

impl<E: StorageEngine + ?Sized> BatchResource<E> {
    /// Allocate a new resource from `engine`.
    pub fn allocate(engine: Arc<E>) -> EngineResult<Self> {
        let id = engine.create_batch_resource()?;
        debug!(resource = %id, "batch resource allocated");
        Ok(Self {
            engine,
            id,
            operations: Vec::new(),
            released: false,
        })
    }

    /// Queue an operation behind those already pending.
    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// Pending operations in accumulation order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Apply all pending operations as one unit, then release the resource.
    ///
    /// The resource is released even when the apply fails.
    pub fn commit(mut self) -> EngineResult<()> {
        let result = self.engine.apply_batch(self.id, &self.operations);
        debug!(
            resource = %self.id,
            ops = self.operations.len(),
            ok = result.is_ok(),
            "batch applied"
        );
        self.release();
        result
    }

    #[cfg(test)]
    pub(crate) fn id(&self) -> ResourceId {
        self.id
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.engine.release_batch_resource(self.id);
    }
}

impl<E: StorageEngine + ?Sized> Drop for BatchResource<E> {
    fn drop(&mut self) {
        if !self.released {
            debug!(
                resource = %self.id,
                ops = self.operations.len(),
                "discarding uncommitted batch"
            );
            self.release();
        }
    }
}

impl<E: StorageEngine + ?Sized> std::fmt::Debug for BatchResource<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchResource")
            .field("pending", &self.operations.len())
            .finish()
    }
}
