//! sled-backed engine

use std::path::Path;

use crate::config::Config;
use crate::error::{PathKvError, Result};

use super::{BatchOp, Engine, WriteBatch};

/// [`Engine`] over a sled database living in one directory
pub struct SledEngine {
    db: sled::Db,
}

impl SledEngine {
    /// Open the database stored in `dir`
    ///
    /// The directory must already exist; the caller decides whether a
    /// missing directory is created or rejected.
    pub fn open(dir: &Path, config: &Config) -> Result<Self> {
        let db = sled::Config::new()
            .path(dir)
            .cache_capacity(config.cache_size)
            .flush_every_ms(config.flush_every_ms)
            .open()
            .map_err(|e| {
                PathKvError::Initialization(format!(
                    "cannot open engine at {}: {}",
                    dir.display(),
                    e
                ))
            })?;

        Ok(Self { db })
    }
}

impl Engine for SledEngine {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key)?.map(|value| value.to_vec()))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.db.insert(key, value)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.db.remove(key)?;
        Ok(())
    }

    fn write(&self, batch: &WriteBatch) -> Result<()> {
        let mut native = sled::Batch::default();
        for op in batch.ops() {
            match op {
                BatchOp::Put { key, value } => native.insert(key.as_slice(), value.as_slice()),
                BatchOp::Delete { key } => native.remove(key.as_slice()),
            }
        }
        self.db.apply_batch(native)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}
