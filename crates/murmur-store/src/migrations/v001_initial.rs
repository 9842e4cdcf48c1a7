//! v001 -- Initial schema creation.
//!
//! Creates the `read_markers` table.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS read_markers (
    key        TEXT PRIMARY KEY NOT NULL,   -- message key
    value      INTEGER NOT NULL,            -- 0 / 1
    expires_at INTEGER NOT NULL             -- Unix epoch millis
);

CREATE INDEX IF NOT EXISTS idx_read_markers_expires_at ON read_markers(expires_at);
"#;

/// Apply the v001 migration.
pub fn up(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(UP_SQL)
}
