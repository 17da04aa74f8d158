use crate::board::message::Message;

/// Longest body shown on one terminal row.
pub const MAX_LINE_CHARS: usize = 30;

/// Auto-scrolling window over the board for fixed-height displays.
///
/// While everything fits, the window stays at the top. Once there are more
/// than `max_visible` messages, each `advance` moves the first visible row
/// down by one and wraps around at the end.
#[derive(Debug, Clone)]
pub struct ScrollWindow {
    max_visible: usize,
    offset: usize,
}

impl ScrollWindow {
    pub fn new(max_visible: usize) -> Self {
        Self {
            max_visible: max_visible.max(1),
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn advance(&mut self, total: usize) {
        if total > self.max_visible {
            self.offset = (self.offset + 1) % total;
        } else {
            self.offset = 0;
        }
    }

    /// Rows to display, starting at the current offset and wrapping.
    pub fn visible<'a>(&self, messages: &'a [Message]) -> Vec<&'a Message> {
        if messages.is_empty() {
            return Vec::new();
        }
        let start = self.offset % messages.len();
        messages
            .iter()
            .cycle()
            .skip(start)
            .take(self.max_visible.min(messages.len()))
            .collect()
    }
}

/// Shortens `body` to fit one row, marking the cut with "...".
pub fn truncate(body: &str) -> String {
    if body.chars().count() <= MAX_LINE_CHARS {
        return body.to_string();
    }
    let mut short: String = body.chars().take(MAX_LINE_CHARS - 3).collect();
    short.push_str("...");
    short
}
