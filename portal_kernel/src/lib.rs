#![forbid(unsafe_code)]

//! Portal Kernel v1
//!
//! Storage-free core of the learning portal: the static catalog,
//! the visitor's session state, and the pure transitions over it.
//! Persistence lives in `portal_runtime`.

/// Version tag written first into the canonical state form.
pub const STATE_VERSION: u32 = 1;

pub mod errors;
pub mod domain;
pub mod enrichment;
pub mod catalog;
pub mod events;
pub mod state;
pub mod transitions;
pub mod invariants;
pub mod hashing;
pub mod dashboard;
pub mod engine;
