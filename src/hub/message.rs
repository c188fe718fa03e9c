//! Message definitions for the hub
//!
//! `ChatMessage` is both the internal and the wire representation of one
//! accepted chat event. Field notes:
//! - `type`: `CHAT`, `JOIN` or `LEAVE`
//! - `content`: free text; for `JOIN`/`LEAVE` a fixed template naming the sender
//! - `sender`: display name of the originating connection
//! - `timestamp`: milliseconds since UNIX epoch, always assigned by the hub

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    Chat,
    Join,
    Leave,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub content: String,
    pub sender: String,
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn chat(sender: &str, content: &str, timestamp: i64) -> Self {
        Self {
            kind: MessageType::Chat,
            content: content.to_string(),
            sender: sender.to_string(),
            timestamp,
        }
    }

    /// Announcement that `sender` entered the chat.
    pub fn join(sender: &str, timestamp: i64) -> Self {
        Self {
            kind: MessageType::Join,
            content: format!("{sender} ist dem Chat beigetreten!"),
            sender: sender.to_string(),
            timestamp,
        }
    }

    /// Announcement that `sender` left the chat.
    pub fn leave(sender: &str, timestamp: i64) -> Self {
        Self {
            kind: MessageType::Leave,
            content: format!("{sender} hat den Chat verlassen!"),
            sender: sender.to_string(),
            timestamp,
        }
    }
}
