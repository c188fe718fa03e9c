//! Connection statistics
//!
//! `ConnectionStats` is an explicitly owned counter object. It is created by
//! whoever constructs the `Hub` and handed to it as an `Arc`, so tests and the
//! binary can each hold their own instance and read it without touching the
//! hub lock.
//!
//! The hub only updates these counters while it holds its registry lock,
//! which keeps `active` equal to the number of joined connections.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct ConnectionStats {
    active: AtomicUsize,
    total_joined: AtomicU64,
    messages_accepted: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connections that completed a join and have not disconnected.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Joins seen over the lifetime of this counter.
    pub fn total_joined(&self) -> u64 {
        self.total_joined.load(Ordering::SeqCst)
    }

    /// Chat messages accepted by the hub (joins and leaves excluded).
    pub fn messages_accepted(&self) -> u64 {
        self.messages_accepted.load(Ordering::SeqCst)
    }

    pub(crate) fn record_join(&self) -> usize {
        self.total_joined.fetch_add(1, Ordering::SeqCst);
        self.active.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn record_leave(&self) -> usize {
        // saturating: never wraps below zero
        let previous = self
            .active
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .unwrap_or(0);
        previous.saturating_sub(1)
    }

    pub(crate) fn record_message(&self) {
        self.messages_accepted.fetch_add(1, Ordering::SeqCst);
    }
}
