//! Write batches
//!
//! A group of staged puts and deletes submitted to the engine in one
//! atomic write.

use crate::error::Result;

use super::Engine;

/// One staged operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

/// Operations staged for a single atomic write
///
/// A batch is owned by the call that builds it and is consumed by
/// [`WriteBatch::commit`]. If it is dropped without a successful commit
/// (early return, engine failure, panic) the staged operations are
/// discarded and never reach the engine.
#[derive(Debug, Default)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
    committed: bool,
}

impl WriteBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a put
    pub fn put(&mut self, key: &[u8], value: &[u8]) {
        self.ops.push(BatchOp::Put {
            key: key.to_vec(),
            value: value.to_vec(),
        });
    }

    /// Stage a delete
    pub fn delete(&mut self, key: &[u8]) {
        self.ops.push(BatchOp::Delete { key: key.to_vec() });
    }

    /// Staged operations, in staging order
    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Submit the batch to `engine`
    ///
    /// Returns the number of operations applied.
    pub fn commit<E: Engine + ?Sized>(mut self, engine: &E) -> Result<usize> {
        engine.write(&self)?;
        self.committed = true;
        tracing::debug!(ops = self.ops.len(), "write batch committed");
        Ok(self.ops.len())
    }
}

impl Drop for WriteBatch {
    fn drop(&mut self) {
        if !self.committed && !self.ops.is_empty() {
            tracing::debug!(ops = self.ops.len(), "write batch discarded");
        }
    }
}
