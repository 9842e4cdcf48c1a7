//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so a session can start with zero
//! configuration.

use std::path::PathBuf;

use chrono::Duration;
use murmur_shared::constants::{DEFAULT_CHROME_ROWS, RETENTION_WINDOW_HOURS};
use murmur_store::{Database, Result as StoreResult};

/// View-state engine configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// How long messages stay relevant. Read markers expire this long after
    /// the message they mark.
    /// Env: `MURMUR_RETENTION_HOURS`
    /// Default: 168 (7 days)
    pub retention_window: Duration,

    /// Rows of fixed chrome subtracted from the terminal height to get the
    /// message pane height.
    /// Env: `MURMUR_CHROME_ROWS`
    /// Default: `6`
    pub chrome_rows: u16,

    /// Directory holding the read-state database.
    /// Env: `MURMUR_DATA_DIR`
    /// Default: `None` (platform data directory).
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            retention_window: Duration::hours(RETENTION_WINDOW_HOURS),
            chrome_rows: DEFAULT_CHROME_ROWS,
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("MURMUR_RETENTION_HOURS") {
            match val.trim().parse::<i64>() {
                Ok(hours) if hours > 0 => config.retention_window = Duration::hours(hours),
                _ => tracing::warn!(
                    value = %val,
                    "Invalid MURMUR_RETENTION_HOURS, using default"
                ),
            }
        }

        if let Some(val) = lookup("MURMUR_CHROME_ROWS") {
            if let Ok(rows) = val.trim().parse::<u16>() {
                config.chrome_rows = rows;
            } else {
                tracing::warn!(value = %val, "Invalid MURMUR_CHROME_ROWS, using default");
            }
        }

        if let Some(dir) = lookup("MURMUR_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }

    /// Open the read-state database this configuration points at.
    pub fn open_database(&self) -> StoreResult<Database> {
        match &self.data_dir {
            Some(dir) => Database::open_in(dir),
            None => Database::new(),
        }
    }
}
