//! The `error` module defines the typed errors used within `chathub`.
//!
//! `HubError` is returned by hub operations and is always recoverable by the
//! caller: the transport either drops the offending event or echoes the error
//! back to the originating connection. `ServerError` covers the failures that
//! stop the server binary from starting.

use thiserror::Error;

use crate::hub::ConnectionId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    /// The connection was never registered or has already disconnected.
    #[error("unknown connection: {0}")]
    UnknownConnection(ConnectionId),

    /// A chat message arrived before the connection completed a join.
    #[error("connection {0} must join before sending messages")]
    NotJoined(ConnectionId),
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("invalid frame: {0}")]
    Json(#[from] serde_json::Error),
}
