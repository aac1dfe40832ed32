#![forbid(unsafe_code)]

//! Learning Portal: Rust Runtime
//!
//! Wraps the storage-free kernel with a durable key-value store,
//! one-shot hydration, and a session context that flushes each
//! mutated collection straight back to the store.
//!
//! No domain logic lives here; transitions and invariants are
//! delegated to `portal_kernel`.

pub mod error;
pub mod store;
pub mod config;
pub mod hydrate;
pub mod session;

pub use config::{PortalConfig, StorageKeys};
pub use session::{Applied, Portal};
pub use store::{DurableStore, DurableStoreExt, FileStore, MemoryStore};
