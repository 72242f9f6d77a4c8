//! Store Registry
//!
//! Hands out one shared [`Store`] per canonical directory.
//!
//! ## Responsibilities
//! - Map canonical directory paths to open stores
//! - Build each store exactly once, even when callers race
//! - Explicit teardown (`release`, `close_all`); stores are never closed
//!   behind the caller's back
//!
//! ## Concurrency
//! - `stores`: RwLock, lookups on the fast path only take the read side
//! - `construction`: Mutex held while a store is being built, so two racing
//!   callers cannot both open the same directory. It is distinct from every
//!   store's own locks; data operations on open stores never touch it.
//!
//! A store opened independently with [`Store::open`] on a directory the
//! registry holds fails with `PathInUse` (and vice versa), through the
//! directory lock every store takes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::config::Config;
use crate::error::{PathKvError, Result};
use crate::store::{prepare_dir, Store};

/// Registry of open stores, one per directory
#[derive(Default)]
pub struct Registry {
    /// Open stores keyed by canonical directory
    stores: RwLock<HashMap<PathBuf, Arc<Store>>>,

    /// Serializes store construction and teardown
    construction: Mutex<()>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the store for `path`, opening it with default config if needed
    pub fn get_handle(&self, path: impl AsRef<Path>) -> Result<Arc<Store>> {
        self.get_handle_with(path, Config::default())
    }

    /// Get the store for `path`, opening it with `config` if needed
    ///
    /// `config` only applies when this call opens the store; an already
    /// registered store keeps the config it was opened with. A registered
    /// store that was closed through its handle stays registered (and
    /// closed) until [`Registry::release`] is called.
    pub fn get_handle_with(&self, path: impl AsRef<Path>, config: Config) -> Result<Arc<Store>> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(PathKvError::Initialization(
                "path to store must not be empty".to_string(),
            ));
        }

        // Fast path: already registered
        if let Some(store) = self.lookup(path) {
            return Ok(store);
        }

        let _guard = self.construction.lock();

        // Re-check: another caller may have built it while we waited
        let dir = prepare_dir(path, &config)?;
        if let Some(store) = self.stores.read().get(&dir) {
            return Ok(Arc::clone(store));
        }

        let store = Arc::new(Store::open_prepared(dir.clone(), config)?);
        self.stores.write().insert(dir.clone(), Arc::clone(&store));

        tracing::info!(path = %dir.display(), "store registered");
        Ok(store)
    }

    /// Whether a store is registered for `path`
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.lookup(path.as_ref()).is_some()
    }

    /// Number of registered stores
    pub fn len(&self) -> usize {
        self.stores.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.read().is_empty()
    }

    /// Close and deregister the store for `path`
    ///
    /// Returns `false` if no store was registered. Handles already given
    /// out observe the store as closed; the next `get_handle` opens a new one.
    pub fn release(&self, path: impl AsRef<Path>) -> Result<bool> {
        let _guard = self.construction.lock();

        let Ok(dir) = fs::canonicalize(path.as_ref()) else {
            return Ok(false);
        };
        let Some(store) = self.stores.write().remove(&dir) else {
            return Ok(false);
        };

        tracing::info!(path = %dir.display(), "store released");
        store.close()?;
        Ok(true)
    }

    /// Close and deregister every store
    ///
    /// Every store is closed even if some fail; the first failure is
    /// returned.
    pub fn close_all(&self) -> Result<()> {
        let _guard = self.construction.lock();

        let stores: Vec<(PathBuf, Arc<Store>)> = self.stores.write().drain().collect();
        let mut first_error = None;

        for (dir, store) in stores {
            if let Err(e) = store.close() {
                tracing::warn!(path = %dir.display(), error = %e, "failed to close store");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn lookup(&self, path: &Path) -> Option<Arc<Store>> {
        let dir = fs::canonicalize(path).ok()?;
        self.stores.read().get(&dir).cloned()
    }
}
