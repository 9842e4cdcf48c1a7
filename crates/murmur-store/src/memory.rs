//! In-process [`KeyValueStore`].
//!
//! Used by tests and by sessions that should not leave anything on disk.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::KeyValueStore;

#[derive(Debug, Clone)]
struct Entry {
    value: bool,
    expires_at: DateTime<Utc>,
}

/// Marker map held in memory. Single-threaded, like the engine that uses it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// TTL-aware lookup as of `now`.
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<bool> {
        let mut entries = self.entries.borrow_mut();
        match entries.get(key) {
            Some(entry) if entry.expires_at <= now => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value),
            None => None,
        }
    }

    pub fn set_at(&self, key: &str, value: bool, ttl: Duration, now: DateTime<Utc>) {
        self.entries.borrow_mut().insert(
            key.to_string(),
            Entry {
                value,
                expires_at: crate::expires_at(now, ttl),
            },
        );
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.get_at(key, Utc::now()))
    }

    fn set(&self, key: &str, value: bool, ttl: Duration) -> Result<()> {
        self.set_at(key, value, ttl, Utc::now());
        Ok(())
    }
}
