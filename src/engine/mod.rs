//! Engine Module
//!
//! The boundary to the ordered key-value engine a store sits on.
//!
//! ## Responsibilities
//! - Point get/put/delete on raw byte strings
//! - Atomic application of a staged [`WriteBatch`]
//! - Flushing pending writes to disk
//!
//! Every call is individually atomic and safe to invoke from many threads
//! at once. Anything composite (read-then-write) must be serialized by the
//! caller.

mod batch;
mod sled_engine;

pub use batch::{BatchOp, WriteBatch};
pub use sled_engine::SledEngine;

use crate::error::Result;

/// An open connection to an ordered key-value engine
///
/// The connection is released when the value is dropped.
pub trait Engine: Send + Sync {
    /// Get the value stored under `key`, `None` if absent
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Apply every staged operation of `batch` atomically, all or none
    fn write(&self, batch: &WriteBatch) -> Result<()>;

    /// Make every acknowledged write durable
    fn flush(&self) -> Result<()>;
}
