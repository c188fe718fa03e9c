use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;
use tungstenite::protocol::Message as WsMessage;

use crate::client::Client;
use crate::hub::ConnectionId;

/// Outbound channels of every live socket, keyed by connection id.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: Mutex<HashMap<ConnectionId, Client>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn clients(&self) -> MutexGuard<'_, HashMap<ConnectionId, Client>> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, client: Client) {
        self.clients().insert(client.id, client);
    }

    pub fn remove(&self, id: &ConnectionId) -> Option<Client> {
        self.clients().remove(id)
    }

    pub fn len(&self) -> usize {
        self.clients().len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients().is_empty()
    }

    /// Queue `msg` for one connection.
    pub fn send_to(&self, id: &ConnectionId, msg: WsMessage) -> bool {
        match self.clients().get(id) {
            Some(client) => client.send(msg),
            None => false,
        }
    }

    /// Queue `msg` for every recipient still registered.
    ///
    /// Recipients that already went away are skipped; returns how many
    /// channels accepted the frame.
    pub fn deliver(&self, recipients: &HashSet<ConnectionId>, msg: &WsMessage) -> usize {
        let clients = self.clients();
        let mut delivered = 0;
        for id in recipients {
            match clients.get(id) {
                Some(client) if client.send(msg.clone()) => delivered += 1,
                Some(_) => warn!(connection = %id, "write loop closed, frame dropped"),
                None => {}
            }
        }
        delivered
    }
}
