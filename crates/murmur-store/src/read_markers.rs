//! Read markers persisted in the `read_markers` table.

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::KeyValueStore;

impl Database {
    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Look up a marker as of `now`. Expired rows are deleted and read as absent.
    pub fn get_marker_at(&self, key: &str, now: DateTime<Utc>) -> Result<Option<bool>> {
        let row: Option<(bool, i64)> = self
            .conn()
            .query_row(
                "SELECT value, expires_at FROM read_markers WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((_, expires_at)) if expires_at <= now.timestamp_millis() => {
                self.conn()
                    .execute("DELETE FROM read_markers WHERE key = ?1", params![key])?;
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value)),
            None => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Write
    // ------------------------------------------------------------------

    /// Store a marker that expires `ttl` after `now`.
    pub fn set_marker_at(
        &self,
        key: &str,
        value: bool,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let expires_at = crate::expires_at(now, ttl).timestamp_millis();
        self.conn().execute(
            "INSERT INTO read_markers (key, value, expires_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, expires_at = excluded.expires_at",
            params![key, value, expires_at],
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete every marker that has expired as of `now`. Returns the number of
    /// rows removed.
    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> Result<usize> {
        let removed = self.conn().execute(
            "DELETE FROM read_markers WHERE expires_at <= ?1",
            params![now.timestamp_millis()],
        )?;
        if removed > 0 {
            tracing::debug!(removed, "purged expired read markers");
        }
        Ok(removed)
    }

    /// Delete every marker that has already expired.
    pub fn purge_expired(&self) -> Result<usize> {
        self.purge_expired_at(Utc::now())
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<bool>> {
        self.get_marker_at(key, Utc::now())
    }

    fn set(&self, key: &str, value: bool, ttl: Duration) -> Result<()> {
        self.set_marker_at(key, value, ttl, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().expect("in-memory db")
    }

    #[test]
    fn test_missing_key_is_absent() {
        assert_eq!(db().get("nope").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let db = db();
        db.set("%msg1", true, Duration::hours(1)).unwrap();
        assert_eq!(db.get("%msg1").unwrap(), Some(true));
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let db = db();
        db.set("%msg1", true, Duration::hours(1)).unwrap();
        db.set("%msg1", false, Duration::hours(1)).unwrap();
        assert_eq!(db.get("%msg1").unwrap(), Some(false));
    }

    #[test]
    fn test_expired_marker_reads_absent() {
        let db = db();
        let now = Utc::now();
        db.set_marker_at("%msg1", true, Duration::minutes(5), now).unwrap();

        assert_eq!(db.get_marker_at("%msg1", now).unwrap(), Some(true));
        let later = now + Duration::minutes(6);
        assert_eq!(db.get_marker_at("%msg1", later).unwrap(), None);
        // the stale row is gone, even for an earlier reader
        assert_eq!(db.get_marker_at("%msg1", now).unwrap(), None);
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let db = db();
        let now = Utc::now();
        db.set_marker_at("%far", true, Duration::milliseconds(i64::MAX), now)
            .unwrap();
        let later = now + Duration::days(365 * 1000);
        assert_eq!(db.get_marker_at("%far", later).unwrap(), Some(true));
    }

    #[test]
    fn test_purge_expired() {
        let db = db();
        let now = Utc::now();
        db.set_marker_at("old", true, Duration::minutes(1), now).unwrap();
        db.set_marker_at("new", true, Duration::hours(1), now).unwrap();

        let removed = db.purge_expired_at(now + Duration::minutes(2)).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(db.get_marker_at("new", now).unwrap(), Some(true));
    }

    #[test]
    fn test_markers_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markers.db");

        Database::open_at(&path)
            .unwrap()
            .set("%msg1", true, Duration::hours(1))
            .unwrap();

        let reopened = Database::open_at(&path).unwrap();
        assert_eq!(reopened.get("%msg1").unwrap(), Some(true));
    }
}
