use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;

use crate::hub::ConnectionId;

/// Represents a connected WebSocket client.
///
/// The `id` is the one the hub assigned at connect time; `sender` feeds the
/// per-connection write loop that owns the socket sink.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: ConnectionId,
    pub sender: UnboundedSender<WsMessage>,
}

impl Client {
    pub fn new(id: ConnectionId, sender: UnboundedSender<WsMessage>) -> Self {
        Self { id, sender }
    }

    /// Queue a frame for this client. Returns `false` once its write loop is gone.
    pub fn send(&self, msg: WsMessage) -> bool {
        self.sender.send(msg).is_ok()
    }
}
