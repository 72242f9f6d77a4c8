//! Store Module
//!
//! A handle on one open key-value store directory.
//!
//! ## Responsibilities
//! - Own the engine connection and the directory lock
//! - Byte-oriented get/put/delete, single and batched
//! - String-oriented convenience layer (see `strings`)
//! - Atomic counters (see `counter`)
//! - Apply the configured [`ErrorPolicy`](crate::config::ErrorPolicy)
//!   to engine failures
//!
//! ## Storable entries
//!
//! Empty keys and empty values are never written, looked up or deleted.
//! Every entry point silently skips them ([`is_storable_key`],
//! [`is_storable_pair`]): a put of `("", "x")` or `("x", "")` is a no-op
//! returning `Ok(())`, and a get of `""` is absent.
//!
//! ## Concurrency Model
//!
//! - Data operations share the engine through the read side of an `RwLock`
//!   and run concurrently; the engine makes each call atomic.
//! - Counter increments additionally hold `counter_lock` for the whole
//!   read-modify-write, so concurrent increments never lose updates.
//! - `close` takes the write side: it waits for in-flight operations, then
//!   releases the engine. Later operations fail with `Closed`.

mod counter;
mod strings;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use crate::codec::Scalar;
use crate::config::Config;
use crate::engine::{Engine, SledEngine, WriteBatch};
use crate::error::{PathKvError, Result};
use crate::lock::DirLock;

/// Whether `key` may be written, read or deleted
pub fn is_storable_key(key: &[u8]) -> bool {
    !key.is_empty()
}

/// Whether the pair may be written
pub fn is_storable_pair(key: &[u8], value: &[u8]) -> bool {
    !key.is_empty() && !value.is_empty()
}

/// An open key-value store
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct Store {
    /// Canonical store directory
    path: PathBuf,

    /// Configuration the store was opened with
    config: Config,

    /// Engine connection, `None` once closed
    engine: RwLock<Option<Box<dyn Engine>>>,

    /// Serializes counter read-modify-write sequences
    counter_lock: Mutex<()>,

    /// Exclusive hold on the directory, released on close
    dir_lock: Mutex<Option<DirLock>>,
}

impl Store {
    /// Open the store in `path`, independently of any registry
    ///
    /// On open:
    /// 1. Create the directory if missing (when `create_if_missing`)
    /// 2. Take the directory lock, failing with `PathInUse` if held
    /// 3. Open the engine
    pub fn open(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let dir = prepare_dir(path.as_ref(), &config)?;
        Self::open_prepared(dir, config)
    }

    /// Open with default config
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path, Config::default())
    }

    /// Open a store whose directory is already created and canonical
    pub(crate) fn open_prepared(dir: PathBuf, config: Config) -> Result<Self> {
        let dir_lock = DirLock::try_acquire(&dir)?;
        let engine = SledEngine::open(&dir, &config)?;

        tracing::info!(path = %dir.display(), cache_size = config.cache_size, "store opened");

        Ok(Self {
            path: dir,
            config,
            engine: RwLock::new(Some(Box::new(engine))),
            counter_lock: Mutex::new(()),
            dir_lock: Mutex::new(Some(dir_lock)),
        })
    }

    /// Build a store over an already open engine
    ///
    /// No directory is touched and no directory lock is taken; `path` only
    /// names the store in errors and logs.
    pub fn with_engine(path: impl Into<PathBuf>, engine: Box<dyn Engine>, config: Config) -> Self {
        Self {
            path: path.into(),
            config,
            engine: RwLock::new(Some(engine)),
            counter_lock: Mutex::new(()),
            dir_lock: Mutex::new(None),
        }
    }

    // =========================================================================
    // Byte-oriented Operations
    // =========================================================================

    /// Put a key-value pair
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        if !is_storable_pair(key, value) {
            return Ok(());
        }
        let result = self.run(|engine| engine.put(key, value));
        self.contain("put", result, ())
    }

    /// Put every storable pair in one atomic write
    ///
    /// Either all staged pairs become visible or none do.
    pub fn put_batch<I, K, V>(&self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let result = self.run(|engine| {
            let mut batch = WriteBatch::new();
            for (key, value) in pairs {
                let (key, value) = (key.as_ref(), value.as_ref());
                if is_storable_pair(key, value) {
                    batch.put(key, value);
                }
            }
            if batch.is_empty() {
                return Ok(());
            }
            batch.commit(engine).map(|_| ())
        });
        self.contain("put_batch", result, ())
    }

    /// Get a value by key
    ///
    /// Returns:
    /// - `Ok(Some(value))`: key found
    /// - `Ok(None)`: key absent (or, best-effort, the lookup failed)
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        if !is_storable_key(key) {
            return Ok(None);
        }
        let result = self.run(|engine| engine.get(key));
        self.contain("get", result, None)
    }

    /// Look up each key, one point read per key
    ///
    /// The result follows the input order; a repeated key keeps its first
    /// position and empty keys are skipped. Absent keys are included with
    /// `None`.
    pub fn get_list<I, K>(&self, keys: I) -> Result<Vec<(Vec<u8>, Option<Vec<u8>>)>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for key in keys {
            let key = key.as_ref();
            if !is_storable_key(key) || !seen.insert(key.to_vec()) {
                continue;
            }
            let value = self.get(key)?;
            entries.push((key.to_vec(), value));
        }

        Ok(entries)
    }

    /// Delete a key
    pub fn delete(&self, key: &[u8]) -> Result<()> {
        if !is_storable_key(key) {
            return Ok(());
        }
        let result = self.run(|engine| engine.delete(key));
        self.contain("delete", result, ())
    }

    /// Delete each key with its own point delete (no atomicity across keys)
    pub fn delete_list<I, K>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        for key in keys {
            self.delete(key.as_ref())?;
        }
        Ok(())
    }

    /// Delete every key in one atomic write
    pub fn delete_batch<I, K>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let result = self.run(|engine| {
            let mut batch = WriteBatch::new();
            for key in keys {
                let key = key.as_ref();
                if is_storable_key(key) {
                    batch.delete(key);
                }
            }
            if batch.is_empty() {
                return Ok(());
            }
            batch.commit(engine).map(|_| ())
        });
        self.contain("delete_batch", result, ())
    }

    // =========================================================================
    // Typed Scalars
    // =========================================================================

    /// Encode `value` with the codec and put it
    pub fn put_scalar<T: Scalar>(&self, key: &[u8], value: &T) -> Result<()> {
        self.put(key, &value.encode())
    }

    /// Get and decode a value
    ///
    /// A stored value that does not decode as `T` is an error whatever the
    /// error policy.
    pub fn get_scalar<T: Scalar>(&self, key: &[u8]) -> Result<Option<T>> {
        self.get(key)?.map(|bytes| T::decode(&bytes)).transpose()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Force pending writes to disk
    pub fn flush(&self) -> Result<()> {
        let result = self.run(|engine| engine.flush());
        self.contain("flush", result, ())
    }

    /// Close the store
    ///
    /// Waits for in-flight operations, flushes (if `flush_on_close`),
    /// releases the engine and the directory lock. Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        let Some(engine) = self.engine.write().take() else {
            return Ok(());
        };

        let result = if self.config.flush_on_close {
            engine.flush()
        } else {
            Ok(())
        };
        drop(engine);
        drop(self.dir_lock.lock().take());

        match &result {
            Ok(()) => tracing::info!(path = %self.path.display(), "store closed"),
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "flush on close failed"),
        }
        self.contain("close", result, ())
    }

    pub fn is_closed(&self) -> bool {
        self.engine.read().is_none()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the canonical store directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Run `f` against the open engine, or fail with `Closed`
    fn run<T>(&self, f: impl FnOnce(&dyn Engine) -> Result<T>) -> Result<T> {
        let guard = self.engine.read();
        match guard.as_deref() {
            Some(engine) => f(engine),
            None => Err(PathKvError::Closed(self.path.clone())),
        }
    }

    /// Apply the error policy to the outcome of a data operation
    ///
    /// Best-effort mode logs engine failures and substitutes `fallback`;
    /// every other error is returned unchanged.
    fn contain<T>(&self, op: &'static str, result: Result<T>, fallback: T) -> Result<T> {
        match result {
            Err(PathKvError::Engine(msg)) if !self.config.is_strict() => {
                tracing::error!(op, path = %self.path.display(), error = %msg, "engine operation failed");
                Ok(fallback)
            }
            other => other,
        }
    }
}

/// Validate `path`, create it if allowed, and return its canonical form
pub(crate) fn prepare_dir(path: &Path, config: &Config) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(PathKvError::Initialization(
            "path to store must not be empty".to_string(),
        ));
    }

    if !path.exists() {
        if !config.create_if_missing {
            return Err(PathKvError::Initialization(format!(
                "store directory does not exist: {}",
                path.display()
            )));
        }
        fs::create_dir_all(path).map_err(|e| {
            PathKvError::Initialization(format!(
                "cannot create store directory {}: {}",
                path.display(),
                e
            ))
        })?;
    } else if !path.is_dir() {
        return Err(PathKvError::Initialization(format!(
            "store path is not a directory: {}",
            path.display()
        )));
    }

    fs::canonicalize(path).map_err(|e| {
        PathKvError::Initialization(format!("cannot resolve {}: {}", path.display(), e))
    })
}
