//! The chat message as the view layer sees it.
//!
//! Messages arrive already decoded from the transport and are never mutated
//! afterwards; every view is a projection over these values.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::constants::TIME_SEPARATOR;
use crate::recipients::RecipientSet;
use crate::types::AuthorId;

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Stable key assigned by the transport (used for read markers and
    /// thread roots).
    pub key: String,
    /// Arrival timestamp in Unix epoch millis. Ordering key of the log.
    pub raw_time: i64,
    /// Timestamp as shown on screen.
    pub time: String,
    /// Author identifier exactly as received.
    pub raw_author: AuthorId,
    /// Whether this message belongs to a private thread.
    pub private: bool,
    /// Participants of the private thread. `None` for public messages.
    pub recipients: Option<Vec<AuthorId>>,
    /// Display text.
    pub text: String,
}

impl Message {
    /// A public message with its display time derived from `raw_time`.
    pub fn public(
        key: impl Into<String>,
        raw_time: i64,
        author: impl Into<AuthorId>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            raw_time,
            time: display_time(raw_time),
            raw_author: author.into(),
            private: false,
            recipients: None,
            text: text.into(),
        }
    }

    /// A private message addressed to `recipients`.
    pub fn private(
        key: impl Into<String>,
        raw_time: i64,
        author: impl Into<AuthorId>,
        recipients: Vec<AuthorId>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            private: true,
            recipients: Some(recipients),
            ..Self::public(key, raw_time, author, text)
        }
    }

    /// Replace the display time.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    /// Recipient list, empty for public messages.
    pub fn recipients(&self) -> &[AuthorId] {
        self.recipients.as_deref().unwrap_or(&[])
    }

    pub fn recipient_set(&self) -> RecipientSet {
        RecipientSet::from_slice(self.recipients())
    }

    /// The line as drawn in the message pane: `"<time>  <text>"`.
    pub fn rendered(&self) -> String {
        format!("{}{}{}", self.time, TIME_SEPARATOR, self.text)
    }

    /// Number of terminal rows the rendered line takes at `width` columns.
    ///
    /// Embedded newlines are hard breaks; every message takes at least one row.
    pub fn line_count(&self, width: u16) -> usize {
        let width = usize::from(width.max(1));
        self.rendered()
            .split('\n')
            .map(|line| UnicodeWidthStr::width(line).div_ceil(width).max(1))
            .sum()
    }
}

/// Format epoch millis as a local wall-clock `HH:MM`.
pub fn display_time(raw_time: i64) -> String {
    DateTime::from_timestamp_millis(raw_time)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_default()
}
