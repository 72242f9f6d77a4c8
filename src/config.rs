//! Configuration for pathkv
//!
//! Centralized configuration with sensible defaults.

/// Configuration applied when a store is opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Engine Configuration
    // -------------------------------------------------------------------------
    /// Engine page cache capacity (in bytes)
    pub cache_size: u64,

    /// Create the store directory when it does not exist yet
    pub create_if_missing: bool,

    /// Background flush interval of the engine (milliseconds), `None` disables it
    pub flush_every_ms: Option<u64>,

    /// Flush pending writes before the engine is released on close
    pub flush_on_close: bool,

    // -------------------------------------------------------------------------
    // Error Handling
    // -------------------------------------------------------------------------
    /// What data operations do with engine failures
    pub error_policy: ErrorPolicy,
}

/// How a store reports engine failures on data operations
///
/// Construction errors, decode errors, closed-store errors and counter
/// failures are always returned, whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Log the failure and carry on: writes report success, reads report
    /// an absent value.
    #[default]
    BestEffort,

    /// Return the failure to the caller.
    Strict,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_size: 50 * 1024 * 1024, // 50 MB
            create_if_missing: true,
            flush_every_ms: Some(500),
            flush_on_close: true,
            error_policy: ErrorPolicy::BestEffort,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Whether engine failures on data operations must reach the caller
    pub fn is_strict(&self) -> bool {
        self.error_policy == ErrorPolicy::Strict
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the engine cache size (in bytes)
    pub fn cache_size(mut self, bytes: u64) -> Self {
        self.config.cache_size = bytes;
        self
    }

    /// Set whether a missing directory is created on open
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.config.create_if_missing = create;
        self
    }

    /// Set the background flush interval (in milliseconds)
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.config.flush_every_ms = ms;
        self
    }

    /// Set whether close flushes before releasing the engine
    pub fn flush_on_close(mut self, flush: bool) -> Self {
        self.config.flush_on_close = flush;
        self
    }

    /// Set the error policy for data operations
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.config.error_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
