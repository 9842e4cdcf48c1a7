//! Which part of the log the current conversation shows.

use murmur_shared::{same_recipients, AuthorId, Message, Mode};

use crate::message_log::MessageLog;

/// Whether `msg` belongs to the conversation described by `mode` and
/// `recipients`.
///
/// Public mode shows every non-private message. Private mode shows private
/// messages addressed to exactly the active recipient set.
pub fn belongs_to(msg: &Message, mode: Mode, recipients: &[AuthorId]) -> bool {
    match mode {
        Mode::Public => !msg.private,
        Mode::Private => msg.private && same_recipients(msg.recipients(), recipients),
    }
}

/// Positions in the [`MessageLog`] of the messages the current conversation
/// shows, in log order.
///
/// Always rebuilt from scratch; positions are only valid until the next
/// insertion, which is why every write to the log is followed by a refresh.
#[derive(Debug, Clone, Default)]
pub struct ConversationFilter {
    indices: Vec<usize>,
}

impl ConversationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, log: &MessageLog, mode: Mode, recipients: &[AuthorId]) {
        self.indices = log
            .iter()
            .enumerate()
            .filter(|(_, msg)| belongs_to(msg, mode, recipients))
            .map(|(i, _)| i)
            .collect();
    }

    /// The filtered messages, oldest first.
    pub fn messages<'a>(&self, log: &'a MessageLog) -> Vec<&'a Message> {
        let all = log.messages();
        self.indices.iter().filter_map(|&i| all.get(i)).collect()
    }

    /// Most recent message in the filtered view.
    pub fn last<'a>(&self, log: &'a MessageLog) -> Option<&'a Message> {
        self.indices.last().and_then(|&i| log.messages().get(i))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
