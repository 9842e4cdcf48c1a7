//! The message log: every message received this session, oldest first.

use murmur_shared::Message;
use tracing::debug;

/// Insert-only list of messages kept sorted by `raw_time`.
///
/// Gossip delivery routinely hands over older messages after newer ones, so
/// insertion places each message by timestamp rather than appending. Equal
/// timestamps keep arrival order.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `msg` at its timestamp position and return that position.
    ///
    /// A late message whose timestamp equals existing ones lands after all of
    /// them, not before the first message at or after its time.
    pub fn insert(&mut self, msg: Message) -> usize {
        let in_order = self
            .messages
            .last()
            .map_or(true, |last| last.raw_time <= msg.raw_time);

        if in_order {
            self.messages.push(msg);
            return self.messages.len() - 1;
        }

        let at = self
            .messages
            .partition_point(|existing| existing.raw_time <= msg.raw_time);
        debug!(
            key = %msg.key,
            raw_time = msg.raw_time,
            position = at,
            "inserting out-of-order message"
        );
        self.messages.insert(at, msg);
        at
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
