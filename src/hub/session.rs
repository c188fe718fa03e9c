//! Per-connection state
//!
//! A `Session` is what the hub remembers about one connection beyond its id:
//! once it has joined, its display name. Sessions live in the hub's registry
//! and are looked up by `ConnectionId`.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque connection identifier assigned by the hub at connect time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    display_name: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Record the display name. Returns `true` if this was the first join.
    pub fn set_display_name(&mut self, name: &str) -> bool {
        self.display_name.replace(name.to_string()).is_none()
    }
}
