//! Hub engine
//!
//! This module contains the in-memory hub responsible for:
//! - registering connections and recording their display names
//! - building `JOIN`, `CHAT` and `LEAVE` messages with server-side timestamps
//! - answering which connections receive a message (the topic snapshot)
//! - keeping `ConnectionStats` in step with the registry
//!
//! Concurrency and usage notes:
//! - Every method takes `&self`; the registry sits behind a single mutex so
//!   the hub can be shared as `Arc<Hub>` between per-connection tasks.
//! - The lock is held only for map lookups and updates. Callers do their
//!   serialization and socket writes after the method returns.
//! - Timestamps are taken under the lock and never go backwards, so the
//!   order in which messages are accepted matches their timestamps.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::hub::message::ChatMessage;
use crate::hub::session::{ConnectionId, Session};
use crate::hub::stats::ConnectionStats;
use crate::hub::topic::Topic;
use crate::hub::DEFAULT_TOPIC;
use crate::utils::error::HubError;

#[derive(Debug)]
pub struct Hub {
    topic: String,
    state: Mutex<HubState>,
    stats: Arc<ConnectionStats>,
}

#[derive(Debug)]
struct HubState {
    sessions: HashMap<ConnectionId, Session>,
    topic: Topic,
    last_timestamp: i64,
}

impl HubState {
    fn stamp(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_timestamp = self.last_timestamp.max(now);
        self.last_timestamp
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC, Arc::new(ConnectionStats::new()))
    }
}

impl Hub {
    pub fn new(topic: &str, stats: Arc<ConnectionStats>) -> Self {
        Self {
            topic: topic.to_string(),
            state: Mutex::new(HubState {
                sessions: HashMap::new(),
                topic: Topic::new(topic),
                last_timestamp: 0,
            }),
            stats,
        }
    }

    /// Name of the topic every connection of this hub belongs to.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn stats(&self) -> &Arc<ConnectionStats> {
        &self.stats
    }

    // Poisoning is ignored: each update below is a single map operation.
    fn state(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new connection without a display name.
    pub fn connect(&self) -> ConnectionId {
        let mut state = self.state();
        self.register(&mut state)
    }

    /// Like `connect`, but refuses once `max` connections are registered.
    ///
    /// The check and the insert happen under the same lock.
    pub fn try_connect(&self, max: usize) -> Option<ConnectionId> {
        let mut state = self.state();
        if state.sessions.len() >= max {
            return None;
        }
        Some(self.register(&mut state))
    }

    fn register(&self, state: &mut HubState) -> ConnectionId {
        let id = ConnectionId::new();
        state.sessions.insert(id, Session::new());
        state.topic.subscribe(id);
        debug!(connection = %id, topic = %self.topic, "connection registered");
        id
    }

    /// Record `display_name` for the connection and build its `JOIN` message.
    ///
    /// Joining again renames the connection without counting it twice.
    pub fn join(&self, id: &ConnectionId, display_name: &str) -> Result<ChatMessage, HubError> {
        let mut state = self.state();
        let session = state
            .sessions
            .get_mut(id)
            .ok_or(HubError::UnknownConnection(*id))?;

        if session.set_display_name(display_name) {
            let count = self.stats.record_join();
            info!(connection = %id, name = %display_name, active = count, "joined chat");
        } else {
            info!(connection = %id, name = %display_name, "rejoined chat");
        }

        let timestamp = state.stamp();
        Ok(ChatMessage::join(display_name, timestamp))
    }

    /// Build a `CHAT` message from a joined connection.
    pub fn send(&self, id: &ConnectionId, content: &str) -> Result<ChatMessage, HubError> {
        let mut state = self.state();
        let session = state
            .sessions
            .get(id)
            .ok_or(HubError::UnknownConnection(*id))?;
        let sender = session
            .display_name()
            .ok_or(HubError::NotJoined(*id))?
            .to_string();

        let timestamp = state.stamp();
        self.stats.record_message();
        debug!(connection = %id, sender = %sender, "chat message accepted");
        Ok(ChatMessage::chat(&sender, content, timestamp))
    }

    /// Connections that should receive `message` right now.
    ///
    /// The returned set is a snapshot; an empty set is a normal answer.
    pub fn broadcast(&self, message: &ChatMessage) -> HashSet<ConnectionId> {
        let recipients = self.state().topic.snapshot();
        debug!(
            kind = ?message.kind,
            sender = %message.sender,
            recipients = recipients.len(),
            topic = %self.topic,
            "fan-out snapshot"
        );
        recipients
    }

    /// Remove the connection and build its `LEAVE` message.
    ///
    /// Unknown or already removed connections are ignored. Connections that
    /// never joined are removed without an announcement.
    pub fn disconnect(&self, id: &ConnectionId) -> Option<ChatMessage> {
        let mut state = self.state();
        let session = match state.sessions.remove(id) {
            Some(session) => session,
            None => {
                debug!(connection = %id, "disconnect for unknown connection ignored");
                return None;
            }
        };
        state.topic.unsubscribe(id);

        let name = session.display_name()?.to_string();
        let remaining = self.stats.record_leave();
        info!(connection = %id, name = %name, active = remaining, "left chat");

        let timestamp = state.stamp();
        Some(ChatMessage::leave(&name, timestamp))
    }

    /// Display name recorded for a connection, if it has joined.
    pub fn display_name(&self, id: &ConnectionId) -> Option<String> {
        self.state()
            .sessions
            .get(id)
            .and_then(|s| s.display_name().map(str::to_string))
    }

    pub fn is_registered(&self, id: &ConnectionId) -> bool {
        self.state().sessions.contains_key(id)
    }

    /// Number of registered connections, joined or not.
    pub fn registered(&self) -> usize {
        self.state().sessions.len()
    }
}
