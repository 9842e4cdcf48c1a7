//! Unread private threads.
//!
//! Notifications are keyed by the thread's participants with the local
//! identity left out, so the same thread never shows up twice no matter how
//! its recipient lists are ordered.

use murmur_shared::{AuthorId, RecipientSet};
use tracing::debug;

/// Ordered list of unread threads, oldest first, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct NotificationTracker {
    pending: Vec<RecipientSet>,
}

impl NotificationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a notification for exactly these participants exists.
    pub fn contains(&self, others: &RecipientSet) -> bool {
        self.pending.iter().any(|n| n == others)
    }

    /// Add a notification unless one for the same participants exists.
    /// Returns whether a new entry was added.
    pub fn notify(&mut self, others: RecipientSet) -> bool {
        if self.contains(&others) {
            return false;
        }
        debug!(participants = others.len(), "new unread private thread");
        self.pending.push(others);
        true
    }

    /// Drop the notification for the thread with `recipients`; `me` is left
    /// out before matching.
    pub fn clear(&mut self, recipients: &[AuthorId], me: &AuthorId) {
        let others = RecipientSet::from_slice(recipients).without(me);
        let before = self.pending.len();
        self.pending.retain(|n| *n != others);
        if self.pending.len() != before {
            debug!(participants = others.len(), "cleared notification");
        }
    }

    pub fn reset(&mut self) {
        self.pending.clear();
    }

    pub fn all(&self) -> &[RecipientSet] {
        &self.pending
    }

    /// The newest notification, or an empty set when there is none.
    pub fn last(&self) -> RecipientSet {
        self.pending.last().cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(raw: &[&str]) -> RecipientSet {
        raw.iter().map(|s| AuthorId::from(*s)).collect()
    }

    fn ids(raw: &[&str]) -> Vec<AuthorId> {
        raw.iter().map(|s| AuthorId::from(*s)).collect()
    }

    #[test]
    fn test_dedup_by_set() {
        let mut tracker = NotificationTracker::new();
        assert!(tracker.notify(set(&["@ann", "@bob"])));
        assert!(!tracker.notify(set(&["@bob", "@ann"])));
        assert!(tracker.notify(set(&["@ann"])));
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.last(), set(&["@ann"]));
    }

    #[test]
    fn test_clear_ignores_self() {
        let me = AuthorId::from("@me");
        let mut tracker = NotificationTracker::new();
        tracker.notify(set(&["@ann", "@bob"]));
        tracker.notify(set(&["@cat"]));

        tracker.clear(&ids(&["@me", "@bob", "@ann"]), &me);
        assert_eq!(tracker.all(), &[set(&["@cat"])]);

        tracker.clear(&ids(&["@cat"]), &me);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_last_of_empty_is_empty_set() {
        assert!(NotificationTracker::new().last().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut tracker = NotificationTracker::new();
        tracker.notify(set(&["@ann"]));
        tracker.reset();
        assert!(tracker.is_empty());
    }
}
