//! Storage engine boundary for kvbatch.
//!
//! A write batch needs exactly three things from a storage engine: allocate
//! a batch resource, atomically apply an ordered list of operations against
//! it, and release it. That contract is the [`StorageEngine`] trait.
//!
//! # Key Types
//!
//! - [`Operation`] -- one pending mutation (`Put`, `Delete`, `ClearAll`)
//! - [`BatchResource`] -- owned allocation, released exactly once
//! - [`InMemoryEngine`] -- ordered `BTreeMap` engine with atomic apply
//! - [`EngineConfig`] -- resource and value limits, history recording
//!
//! # Design Rules
//!
//! 1. A batch is applied entirely or not at all.
//! 2. Operations apply in the order they were queued, with no coalescing.
//! 3. Releasing a resource is the caller's job and happens whatever the
//!    apply outcome.
//! 4. Distinct resources never affect each other.

pub mod config;
pub mod error;
pub mod memory;
pub mod operation;
pub mod resource;
pub mod traits;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use memory::{AppliedBatch, InMemoryEngine};
pub use operation::{Operation, ResourceId};
pub use resource::BatchResource;
pub use traits::StorageEngine;
