//! # pathkv
//!
//! Typed, thread-safe access to embedded ordered key-value stores:
//! - One shared store handle per directory, handed out by a [`Registry`]
//! - Byte and string get/put/delete, single and batched
//! - Atomic write batches
//! - Fixed-width binary codec for primitive scalars
//! - Atomic i32/i64 counters
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Registry                              │
//! │          (canonical path -> Arc<Store>, built once)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Store                                │
//! │   bytes / strings / counters       (error policy applied)   │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//!   ┌─────────────────┐            ┌─────────────────┐
//!   │      Codec      │            │  Engine (sled)  │
//!   │ (fixed-width BE)│            │  + WriteBatch   │
//!   └─────────────────┘            └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use pathkv::Registry;
//!
//! # fn main() -> pathkv::Result<()> {
//! let registry = Registry::new();
//! let store = registry.get_handle("./data/users")?;
//!
//! store.put_str("user:1", "alice")?;
//! assert_eq!(store.get_str("user:1")?, "alice");
//!
//! let visits = store.increment_i64("visits", 1)?;
//! assert_eq!(visits, 1);
//!
//! registry.close_all()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod engine;
pub mod lock;
pub mod store;
pub mod registry;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PathKvError, Result};
pub use config::{Config, ErrorPolicy};
pub use codec::Scalar;
pub use engine::{Engine, WriteBatch};
pub use store::{is_storable_key, is_storable_pair, Store};
pub use registry::Registry;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of pathkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
