//! Durable key-value storage
//!
//! One string value per key. Failures never surface to the game: a failed
//! read is an absent value and a failed write disappears.

use std::collections::HashMap;

/// Durable string-to-string store
pub trait Storage {
    /// Stored value for `key`, or None when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`; failures are dropped
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store for tests and the headless build
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage. Quota and privacy-mode failures degrade to
/// no-ops, the same as storage being absent entirely.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn backing() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::backing().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = Self::backing() {
            if storage.set_item(key, value).is_err() {
                log::warn!("Dropped storage write for {}", key);
            }
        }
    }
}
