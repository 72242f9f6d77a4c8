//! String-oriented convenience layer
//!
//! Thin wrappers that store keys and values as UTF-8 through the codec.
//!
//! `get_str` returns an empty string for an absent key. In best-effort mode
//! a failed lookup or a stored value that is not valid UTF-8 also yields an
//! empty string, so absent and failed cannot be told apart; strict mode
//! returns those failures as errors. Use [`Store::get`] or
//! `get_scalar::<String>` when absence must be observable.

use crate::codec;
use crate::error::Result;

use super::Store;

impl Store {
    /// Put a string pair; empty key or value is a no-op
    pub fn put_str(&self, key: &str, value: &str) -> Result<()> {
        self.put(key.as_bytes(), value.as_bytes())
    }

    /// Put every non-empty string pair in one atomic write
    pub fn put_str_batch<I, K, V>(&self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.put_batch(
            pairs
                .into_iter()
                .map(|(key, value)| (codec::encode_str(key.as_ref()), codec::encode_str(value.as_ref()))),
        )
    }

    /// Get a string value, empty if absent
    pub fn get_str(&self, key: &str) -> Result<String> {
        match self.get(key.as_bytes())? {
            Some(bytes) => Ok(self.decode_text("get_str", &bytes)?.unwrap_or_default()),
            None => Ok(String::new()),
        }
    }

    /// Look up each string key, one point read per key
    ///
    /// Same ordering rules as [`Store::get_list`]; absent keys map to `None`.
    pub fn get_str_list<I, K>(&self, keys: I) -> Result<Vec<(String, Option<String>)>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let entries = self.get_list(keys.into_iter().map(|key| codec::encode_str(key.as_ref())))?;

        let mut result = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let key = codec::decode_str(&key)?;
            let value = match value {
                Some(bytes) => self.decode_text("get_str_list", &bytes)?,
                None => None,
            };
            result.push((key, value));
        }
        Ok(result)
    }

    /// Delete a string key
    pub fn delete_str(&self, key: &str) -> Result<()> {
        self.delete(key.as_bytes())
    }

    /// Delete each string key independently
    pub fn delete_str_list<I, K>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            self.delete_str(key.as_ref())?;
        }
        Ok(())
    }

    /// Delete every string key in one atomic write
    pub fn delete_str_batch<I, K>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.delete_batch(keys.into_iter().map(|key| codec::encode_str(key.as_ref())))
    }

    /// Decode a stored value as UTF-8, honouring the error policy
    fn decode_text(&self, op: &'static str, bytes: &[u8]) -> Result<Option<String>> {
        match codec::decode_str(bytes) {
            Ok(text) => Ok(Some(text)),
            Err(e) if !self.config.is_strict() => {
                tracing::error!(op, path = %self.path.display(), error = %e, "stored value is not a string");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
