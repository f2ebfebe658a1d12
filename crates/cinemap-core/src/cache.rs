use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// In-memory, session-scoped cache keyed by string.
///
/// Entries never expire and are never evicted; the cache lives exactly as
/// long as its owner. Values are handed out as `Arc` so a hit costs no copy.
pub struct SessionCache<V> {
    name: &'static str,
    entries: RwLock<HashMap<String, Arc<V>>>,
}

impl<V> SessionCache<V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let hit = entries.get(key).cloned();
        if hit.is_some() {
            debug!("Cache hit: {} {}", self.name, key);
        } else {
            debug!("Cache miss: {} {}", self.name, key);
        }
        hit
    }

    /// Insert or replace; returns the stored value
    pub fn set(&self, key: impl Into<String>, value: V) -> Arc<V> {
        let key = key.into();
        let value = Arc::new(value);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.clone(), Arc::clone(&value));
        debug!("Cache saved: {} {} ({} entries)", self.name, key, entries.len());
        value
    }

    pub fn has(&self, key: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(|e| e.into_inner()).clear();
        debug!("Cleared {} cache", self.name);
    }
}
