//! Which messages have been read, remembered across sessions.

use chrono::{DateTime, Duration, Utc};
use murmur_shared::Message;
use murmur_store::KeyValueStore;
use tracing::trace;

use crate::error::Result;

/// Read markers keyed by message key.
///
/// A marker only needs to outlive its message, so its TTL runs out when the
/// message leaves the retention window.
#[derive(Debug)]
pub struct ReadStateTracker<S> {
    store: S,
    retention_window: Duration,
}

impl<S: KeyValueStore> ReadStateTracker<S> {
    pub fn new(store: S, retention_window: Duration) -> Self {
        Self {
            store,
            retention_window,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_read(&self, msg: &Message) -> Result<bool> {
        Ok(self.store.get(&msg.key)?.unwrap_or(false))
    }

    pub fn mark_read(&self, msg: &Message) -> Result<()> {
        self.mark_read_at(msg, Utc::now())
    }

    /// Mark `msg` read as of `now`. Messages already past the retention
    /// window are skipped; their marker would be born expired.
    pub fn mark_read_at(&self, msg: &Message, now: DateTime<Utc>) -> Result<()> {
        match self.ttl_for(msg, now) {
            Some(ttl) if ttl > Duration::zero() => {
                self.store.set(&msg.key, true, ttl)?;
            }
            _ => trace!(key = %msg.key, "message outside retention window, not marking"),
        }
        Ok(())
    }

    /// `(raw_time + retention_window) - now`, saturating at the millisecond
    /// range. `None` when the result is too far in the past to represent.
    pub fn ttl_for(&self, msg: &Message, now: DateTime<Utc>) -> Option<Duration> {
        let millis = msg
            .raw_time
            .saturating_add(self.retention_window.num_milliseconds())
            .saturating_sub(now.timestamp_millis());
        Duration::try_milliseconds(millis)
    }
}
