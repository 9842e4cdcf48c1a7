//! Virtualized scrolling over the filtered messages.
//!
//! Only the messages that fit in the message pane are handed to the renderer.
//! Packing walks backwards from a start position (the newest message, or the
//! scroll index), adding whole messages until the next one would overflow.
//! A message is never cut in half: if it does not fit, neither it nor
//! anything older is shown.

use murmur_shared::constants::INPUT_PROMPT;
use murmur_shared::Message;
use serde::{Deserialize, Serialize};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// Terminal dimensions and the derived message-pane height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    /// Rows available to messages: `height` minus fixed chrome.
    pub show_lines: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16, chrome_rows: u16) -> Self {
        Self {
            width,
            height,
            show_lines: height.saturating_sub(chrome_rows),
        }
    }

    /// Rows taken by the input box holding `input`, prompt included.
    ///
    /// Measured in terminal columns rather than characters, so wide glyphs
    /// count double. `None` until the terminal has a width.
    pub fn input_lines(&self, input: &str) -> Option<usize> {
        if self.width == 0 {
            return None;
        }
        let columns = UnicodeWidthStr::width(INPUT_PROMPT) + UnicodeWidthStr::width(input);
        Some(columns.div_ceil(usize::from(self.width)))
    }
}

/// Manual scroll position.
///
/// `index` is the position in the filtered list packing starts from while
/// scrolling. `0` means anchored to the live bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollState {
    pub is_scrolling: bool,
    pub at_top: bool,
    pub at_bottom: bool,
    pub index: usize,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            is_scrolling: false,
            at_top: false,
            at_bottom: true,
            index: 0,
        }
    }
}

impl ScrollState {
    /// Back to following the newest message.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scroll index, or the list length when anchored.
    fn base(&self, len: usize) -> usize {
        if self.index == 0 {
            len
        } else {
            self.index
        }
    }

    /// Whether another page up from here would start before the second message.
    fn top_reached(&self, len: usize, visible: usize) -> bool {
        (self.base(len) as i64) - (visible as i64) - 1 < 1
    }

    /// Move one page towards older messages. Returns `false` when there is
    /// nothing to scroll.
    pub fn page_up(&mut self, len: usize, visible: usize, viewport: &Viewport) -> bool {
        if self.at_top || len < usize::from(viewport.show_lines) {
            return false;
        }

        self.is_scrolling = true;
        self.index = self.base(len).saturating_sub(visible + 1);
        self.at_top = self.top_reached(len, visible);
        true
    }

    /// Move one page towards newer messages. Running past the newest message
    /// snaps back to the live view on the next pack.
    pub fn page_down(&mut self, len: usize, visible: usize, viewport: &Viewport) -> bool {
        if self.at_bottom {
            return false;
        }

        let remaining = usize::from(viewport.height).saturating_sub(visible);
        self.index += visible.max(remaining);
        self.at_top = self.top_reached(len, visible);
        true
    }
}

/// Select the messages that fit in the pane, oldest first.
///
/// The input box height is reserved twice: once up front and once inside
/// every fit check. That headroom is part of the expected layout.
pub fn pack<'a>(
    messages: &[&'a Message],
    viewport: &Viewport,
    input: &str,
    scroll: &mut ScrollState,
) -> Vec<&'a Message> {
    let mut start = messages.len().checked_sub(1);
    if scroll.is_scrolling {
        if start.map_or(true, |last| scroll.index > last) {
            debug!(index = scroll.index, len = messages.len(), "scrolled past the end, snapping to bottom");
            scroll.reset();
        } else {
            start = Some(scroll.index);
            scroll.at_bottom = false;
        }
    }

    let (Some(start), Some(input_lines)) = (start, viewport.input_lines(input)) else {
        return Vec::new();
    };

    let budget = usize::from(viewport.show_lines);
    let mut used = input_lines;
    let mut visible = Vec::new();

    for msg in messages[..=start].iter().rev() {
        let lines = msg.line_count(viewport.width);
        if used + lines + input_lines > budget {
            break;
        }
        visible.push(*msg);
        used += lines;
    }

    visible.reverse();
    visible
}
