use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, RwLock};

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::operation::{Operation, ResourceId};
use crate::traits::StorageEngine;

/// A batch the engine has applied, as recorded in its history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedBatch {
    pub resource: ResourceId,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Default)]
struct ResourceTable {
    next_id: u64,
    open: BTreeSet<ResourceId>,
}

/// Ordered in-memory key-value engine.
///
/// Keys are kept in a `BTreeMap`. A batch is validated in full before any of
/// it is applied, and applied under a single write lock, so readers observe
/// either none or all of it.
pub struct InMemoryEngine {
    config: EngineConfig,
    data: RwLock<BTreeMap<String, Vec<u8>>>,
    resources: Mutex<ResourceTable>,
    history: Mutex<Vec<AppliedBatch>>,
}

impl InMemoryEngine {
    /// Create an empty engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an empty engine with the given configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            data: RwLock::new(BTreeMap::new()),
            resources: Mutex::new(ResourceTable::default()),
            history: Mutex::new(Vec::new()),
        }
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current value of `key`.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.data.read().expect("lock poisoned").get(key).cloned()
    }

    /// Returns `true` if `key` currently holds a value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.read().expect("lock poisoned").contains_key(key)
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.data.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.read().expect("lock poisoned").is_empty()
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<String> {
        self.data.read().expect("lock poisoned").keys().cloned().collect()
    }

    /// Copy of the full contents.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.data.read().expect("lock poisoned").clone()
    }

    /// Batches applied so far, oldest first. Empty if history is disabled.
    pub fn history(&self) -> Vec<AppliedBatch> {
        self.history.lock().expect("lock poisoned").clone()
    }

    /// Number of batch resources allocated and not yet released.
    pub fn open_batches(&self) -> usize {
        self.resources.lock().expect("lock poisoned").open.len()
    }

    fn validate(&self, operations: &[Operation]) -> EngineResult<()> {
        for (index, op) in operations.iter().enumerate() {
            match op {
                Operation::Put { key, value } => {
                    if key.is_empty() {
                        return Err(EngineError::InvalidOperation {
                            index,
                            reason: "empty key".into(),
                        });
                    }
                    if value.len() > self.config.max_value_size {
                        return Err(EngineError::ValueTooLarge {
                            key: key.clone(),
                            size: value.len(),
                            limit: self.config.max_value_size,
                        });
                    }
                }
                Operation::Delete { key } => {
                    if key.is_empty() {
                        return Err(EngineError::InvalidOperation {
                            index,
                            reason: "empty key".into(),
                        });
                    }
                }
                Operation::ClearAll => {}
            }
        }
        Ok(())
    }
}

impl Default for InMemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageEngine for InMemoryEngine {
    fn create_batch_resource(&self) -> EngineResult<ResourceId> {
        let mut table = self.resources.lock().expect("lock poisoned");
        if table.open.len() >= self.config.max_open_batches {
            return Err(EngineError::ResourceExhausted {
                open: table.open.len(),
                limit: self.config.max_open_batches,
            });
        }
        let id = ResourceId::new(table.next_id);
        table.next_id += 1;
        table.open.insert(id);
        Ok(id)
    }

    fn apply_batch(&self, resource: ResourceId, operations: &[Operation]) -> EngineResult<()> {
        if !self
            .resources
            .lock()
            .expect("lock poisoned")
            .open
            .contains(&resource)
        {
            return Err(EngineError::UnknownResource(resource));
        }
        if let Err(e) = self.validate(operations) {
            warn!(resource = %resource, error = %e, "rejecting batch");
            return Err(e);
        }

        let mut data = self.data.write().expect("lock poisoned");
        for op in operations {
            match op {
                Operation::Put { key, value } => {
                    data.insert(key.clone(), value.clone());
                }
                Operation::Delete { key } => {
                    data.remove(key);
                }
                Operation::ClearAll => data.clear(),
            }
        }
        // Logged under the data lock so history order matches apply order.
        if self.config.record_history {
            self.history.lock().expect("lock poisoned").push(AppliedBatch {
                resource,
                operations: operations.to_vec(),
            });
        }
        drop(data);
        debug!(resource = %resource, ops = operations.len(), "batch committed");
        Ok(())
    }

    fn release_batch_resource(&self, resource: ResourceId) {
        self.resources
            .lock()
            .expect("lock poisoned")
            .open
            .remove(&resource);
    }
}

impl std::fmt::Debug for InMemoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEngine")
            .field("key_count", &self.len())
            .field("open_batches", &self.open_batches())
            .finish()
    }
}
