//! Wire frames
//!
//! Inbound frames are tagged by `destination`, mirroring the two entry points
//! of the chat (`chat.join` and `chat.send`; the `/app/` prefixed forms are
//! accepted too). Outbound frames are tagged by `kind`. Unknown fields, such
//! as a client-side `timestamp`, are ignored.

use serde::{Deserialize, Serialize};
use tungstenite::protocol::Message as WsMessage;

use crate::hub::ChatMessage;

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "destination")]
pub enum ClientFrame {
    #[serde(rename = "chat.join", alias = "/app/chat.join")]
    Join { sender: String },

    #[serde(rename = "chat.send", alias = "/app/chat.send")]
    Send { content: String },
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "kind")]
pub enum ServerFrame {
    #[serde(rename = "message")]
    Message { topic: String, message: ChatMessage },

    #[serde(rename = "error")]
    Error { message: String },
}

impl ServerFrame {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Serialize into a WebSocket text frame.
    pub fn to_ws(&self) -> Result<WsMessage, serde_json::Error> {
        Ok(WsMessage::text(serde_json::to_string(self)?))
    }
}
