use crate::error::EngineResult;
use crate::operation::{Operation, ResourceId};

/// The write-side primitives a batch needs from a storage engine.
///
/// Implementations must satisfy these invariants:
/// - `apply_batch` is atomic: every operation becomes visible, in order,
///   or none does.
/// - Operations are applied exactly as given. No reordering, deduplication
///   or coalescing; a later mutation of a key supersedes an earlier one.
/// - Resources are independent. Releasing or applying one never affects
///   another.
/// - `apply_batch` never releases the resource. The caller releases it
///   exactly once, whatever the apply outcome.
pub trait StorageEngine: Send + Sync {
    /// Allocate an empty batch resource.
    ///
    /// Returns `EngineError::ResourceExhausted` if none can be allocated; no
    /// partial allocation is left behind in that case.
    fn create_batch_resource(&self) -> EngineResult<ResourceId>;

    /// Atomically apply `operations` in order.
    ///
    /// May block until the engine has made the batch visible.
    fn apply_batch(&self, resource: ResourceId, operations: &[Operation]) -> EngineResult<()>;

    /// Free a resource. Releasing an unknown resource is a no-op.
    fn release_batch_resource(&self, resource: ResourceId);
}
