//! Platform abstraction layer
//!
//! Time arrives through frame timestamps and input through events, so the
//! only platform service the core consumes directly is durable storage.

pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{MemoryStore, Storage};
