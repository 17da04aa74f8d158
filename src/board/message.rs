use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::BoardError;

pub type MessageId = i64;

/// A single entry on the board.
///
/// `created` is filled in by the store when a candidate arrives without one.
/// `modified` stays `None` until the first update.
///
/// # Example
///
/// ```rust
/// use display_board::board::message::Message;
///
/// let msg = Message::new(1, Some("ana".to_string()), "Standup moved to 10:30");
/// assert!(msg.created.is_none());
/// assert!(msg.modified.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub author: Option<String>,
    pub body: String,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(id: MessageId, author: Option<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            author,
            body: body.into(),
            created: None,
            modified: None,
        }
    }
}

/// Validated user input for a new or edited message.
///
/// Construction is the only place an empty body is rejected; everything
/// past this point may assume a non-empty body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    body: String,
    author: Option<String>,
}

impl Submission {
    /// Whitespace-only bodies count as empty. A blank author is dropped.
    pub fn parse(body: &str, author: Option<&str>) -> Result<Self, BoardError> {
        if body.trim().is_empty() {
            return Err(BoardError::EmptyBody);
        }

        let author = author
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        Ok(Self {
            body: body.to_string(),
            author,
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn into_message(self, id: MessageId) -> Message {
        Message::new(id, self.author, self.body)
    }
}

/// Parses a message identifier coming from a query string or socket frame.
pub fn parse_id(raw: &str) -> Result<MessageId, BoardError> {
    raw.trim()
        .parse::<MessageId>()
        .map_err(|_| BoardError::InvalidId(raw.to_string()))
}

/// Hands out message identifiers.
///
/// A plain counter: two submissions in the same instant still get distinct ids.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: MessageId) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }

    pub fn next_id(&self) -> MessageId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
