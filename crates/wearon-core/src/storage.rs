//! Session Storage Capability
//!
//! Key-value storage scoped to the shopper's browsing session. The browser
//! adapter wraps `sessionStorage`; everything else uses the in-memory store.

use std::collections::HashMap;
use std::sync::RwLock;

/// Session-scoped key-value store
pub trait SessionStore: Send + Sync {
    /// Read a value, `None` if the key was never set
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set_item(&self, key: &str, value: &str);

    /// Remove a key; no-op if absent
    fn remove_item(&self, key: &str);
}

/// In-memory `SessionStore`
pub struct MemorySessionStore {
    items: RwLock<HashMap<String, String>>,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().unwrap().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.write().unwrap().remove(key);
    }
}
