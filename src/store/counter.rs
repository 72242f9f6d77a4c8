//! Atomic counters
//!
//! Integer counters stored with the codec's fixed-width encoding. Each
//! increment is a read-modify-write done under the store's counter lock:
//! the engine makes the get and the put individually atomic, the lock makes
//! the pair atomic with respect to every other increment on the store.
//!
//! Counters never follow the best-effort policy. A value is returned only
//! once it has been written; any failure is returned instead.

use crate::codec::Scalar;
use crate::error::{PathKvError, Result};

use super::{is_storable_key, Store};

impl Store {
    /// Add `delta` to the i32 counter at `key` and return the new value
    ///
    /// An absent key counts as 0. Overflow wraps.
    pub fn increment_i32(&self, key: impl AsRef<[u8]>, delta: i32) -> Result<i32> {
        self.read_modify_write(key.as_ref(), "increment_i32", |current: i32| {
            current.wrapping_add(delta)
        })
    }

    /// Add `delta` to the i64 counter at `key` and return the new value
    ///
    /// An absent key counts as 0. Overflow wraps.
    pub fn increment_i64(&self, key: impl AsRef<[u8]>, delta: i64) -> Result<i64> {
        self.read_modify_write(key.as_ref(), "increment_i64", |current: i64| {
            current.wrapping_add(delta)
        })
    }

    fn read_modify_write<T, F>(&self, key: &[u8], op: &'static str, update: F) -> Result<T>
    where
        T: Scalar + Default,
        F: FnOnce(T) -> T,
    {
        if !is_storable_key(key) {
            return Err(PathKvError::InvalidInput(format!(
                "{}: counter key must not be empty",
                op
            )));
        }

        let _guard = self.counter_lock.lock();
        self.run(|engine| {
            let current = match engine.get(key)? {
                Some(bytes) => T::decode(&bytes)?,
                None => T::default(),
            };
            let next = update(current);
            engine.put(key, &next.encode())?;
            Ok(next)
        })
    }
}
