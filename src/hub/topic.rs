//! Topic membership
//!
//! A `Topic` holds the set of connection ids subscribed to one topic name.
//! Duplicate subscriptions are a no-op and insertion order is irrelevant.
//!
//! Concurrency note: `Topic` has no locking of its own; the hub mutates it
//! only while holding its registry lock.

use std::collections::HashSet;

use crate::hub::session::ConnectionId;

#[derive(Debug, Default)]
pub struct Topic {
    pub name: String,
    pub members: HashSet<ConnectionId>,
}

impl Topic {
    /// Create a new, empty topic with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: HashSet::new(),
        }
    }

    /// Add a member to the topic. Duplicate adds are ignored.
    pub fn subscribe(&mut self, id: ConnectionId) {
        self.members.insert(id);
    }

    /// Remove a member. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: &ConnectionId) -> bool {
        self.members.remove(id)
    }

    /// Copy of the current member set.
    pub fn snapshot(&self) -> HashSet<ConnectionId> {
        self.members.clone()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
