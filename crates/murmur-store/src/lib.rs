//! # murmur-store
//!
//! Durable key/value storage for read markers.
//!
//! The view-state engine only needs two operations from storage: look up a
//! boolean flag by key, and set one with a time-to-live. That capability is
//! the [`KeyValueStore`] trait. [`Database`] backs it with SQLite on disk;
//! [`MemoryStore`] keeps everything in process for tests and ephemeral
//! sessions.

pub mod database;
pub mod memory;
pub mod migrations;
pub mod read_markers;

mod error;

use chrono::{DateTime, Duration, Utc};

pub use database::Database;
pub use error::{Result, StoreError};
pub use memory::MemoryStore;

/// Boolean flags keyed by string, each expiring after its own TTL.
///
/// Entries whose TTL has elapsed read back as absent.
pub trait KeyValueStore {
    /// Look up `key`. `None` means never set, or expired.
    fn get(&self, key: &str) -> Result<Option<bool>>;

    /// Store `value` under `key` for `ttl`, replacing any previous entry.
    fn set(&self, key: &str, value: bool, ttl: Duration) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<bool>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: bool, ttl: Duration) -> Result<()> {
        (**self).set(key, value, ttl)
    }
}

/// When an entry written at `now` with `ttl` expires. Out-of-range results are
/// clamped to the representable bounds instead of overflowing.
pub(crate) fn expires_at(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    match now.checked_add_signed(ttl) {
        Some(at) => at,
        None if ttl > Duration::zero() => DateTime::<Utc>::MAX_UTC,
        None => DateTime::<Utc>::MIN_UTC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_at_clamps() {
        let now = Utc::now();
        assert_eq!(expires_at(now, Duration::hours(1)), now + Duration::hours(1));
        assert_eq!(
            expires_at(now, Duration::milliseconds(9_000_000_000_000_000)),
            DateTime::<Utc>::MAX_UTC
        );
        assert_eq!(
            expires_at(now, Duration::milliseconds(-9_000_000_000_000_000)),
            DateTime::<Utc>::MIN_UTC
        );
    }
}
