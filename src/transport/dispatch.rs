//! Frame dispatch
//!
//! The `Dispatcher` sits between sockets and the hub. For each inbound frame it
//! calls the matching hub operation, wrapped in `traced::timed`, and then
//! either fans the resulting message out to the hub's recipient snapshot or
//! answers the originating connection with an error frame. Errors are never
//! broadcast.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::client::{Client, ClientRegistry};
use crate::hub::{traced, ChatMessage, ConnectionId, Hub};
use crate::transport::message::{ClientFrame, ServerFrame};
use crate::utils::error::HubError;

#[derive(Debug)]
pub struct Dispatcher {
    hub: Arc<Hub>,
    clients: ClientRegistry,
    max_connections: usize,
}

impl Dispatcher {
    pub fn new(hub: Arc<Hub>, max_connections: usize) -> Self {
        Self {
            hub,
            clients: ClientRegistry::new(),
            max_connections,
        }
    }

    pub fn hub(&self) -> &Arc<Hub> {
        &self.hub
    }

    pub fn clients(&self) -> &ClientRegistry {
        &self.clients
    }

    /// Register a freshly accepted socket with the hub and the client registry.
    ///
    /// Returns `None` when the hub is already at `max_connections`.
    pub fn open(&self, sender: UnboundedSender<WsMessage>) -> Option<ConnectionId> {
        let Some(id) = traced::timed("connect", || self.hub.try_connect(self.max_connections))
        else {
            warn!(max = self.max_connections, "connection limit reached, refusing socket");
            return None;
        };
        self.clients.register(Client::new(id, sender));
        info!(connection = %id, "client connected");
        Some(id)
    }

    /// Handle one text frame received from `id`.
    pub fn handle_text(&self, id: &ConnectionId, text: &str) {
        let frame = match serde_json::from_str::<ClientFrame>(text) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(connection = %id, error = %err, "invalid client frame");
                self.reply_error(id, format!("invalid frame: {err}"));
                return;
            }
        };

        let result = match frame {
            ClientFrame::Join { sender } => {
                let name = sender.trim();
                if name.is_empty() {
                    self.reply_error(id, "display name must not be empty");
                    return;
                }
                traced::timed("join", || self.hub.join(id, name))
            }
            ClientFrame::Send { content } => {
                traced::timed("send", || self.hub.send(id, &content))
            }
        };

        match result {
            Ok(message) => {
                self.fan_out(&message);
            }
            Err(err @ HubError::NotJoined(_)) => {
                warn!(connection = %id, "message rejected before join");
                self.reply_error(id, err.to_string());
            }
            Err(err @ HubError::UnknownConnection(_)) => {
                warn!(connection = %id, error = %err, "frame from unregistered connection dropped");
            }
        }
    }

    /// Tear down `id`: drop its outbound channel and announce the leave.
    ///
    /// Safe to call more than once.
    pub fn close(&self, id: &ConnectionId) {
        self.clients.remove(id);
        if let Some(leave) = traced::timed("disconnect", || self.hub.disconnect(id)) {
            self.fan_out(&leave);
        }
        info!(connection = %id, "client disconnected");
    }

    /// Deliver `message` to the hub's current recipients. Returns how many
    /// connections it was queued for.
    pub fn fan_out(&self, message: &ChatMessage) -> usize {
        let frame = ServerFrame::Message {
            topic: self.hub.topic().to_string(),
            message: message.clone(),
        };
        let ws_msg = match frame.to_ws() {
            Ok(ws_msg) => ws_msg,
            Err(err) => {
                error!(error = %err, "failed to serialize message");
                return 0;
            }
        };
        let recipients = traced::timed("broadcast", || self.hub.broadcast(message));
        self.clients.deliver(&recipients, &ws_msg)
    }

    fn reply_error(&self, id: &ConnectionId, message: impl Into<String>) {
        match ServerFrame::error(message).to_ws() {
            Ok(ws_msg) => {
                self.clients.send_to(id, ws_msg);
            }
            Err(err) => error!(error = %err, "failed to serialize error frame"),
        }
    }
}
