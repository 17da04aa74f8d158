use serde::{Deserialize, Serialize};

use crate::board::message::{Message, MessageId};

/// Frames a live viewer may send.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "submit")]
    Submit {
        body: String,
        author: Option<String>,
    },
    #[serde(rename = "delete")]
    Delete { id: MessageId },
    #[serde(rename = "update")]
    Update {
        id: MessageId,
        body: String,
        author: Option<String>,
    },
    #[serde(rename = "refresh")]
    Refresh,
}

/// Frames pushed to live viewers.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "snapshot")]
    Snapshot { messages: Vec<Message> },
    #[serde(rename = "error")]
    Error { message: String },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}
