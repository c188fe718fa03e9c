//! The `hub` module is the broadcast core of `chathub`.
//!
//! It tracks connections and their display names, stamps every accepted
//! message with a server-side timestamp, and answers the only routing question
//! the transport asks: which connections should receive this message. The hub
//! owns no sockets; delivery is the transport's job.

pub mod engine;
pub mod message;
pub mod session;
pub mod stats;
pub mod topic;
pub mod traced;

pub use engine::Hub;
pub use message::{ChatMessage, MessageType};
pub use session::{ConnectionId, Session};
pub use stats::ConnectionStats;

/// Name of the shared topic every connection belongs to unless configured otherwise.
pub const DEFAULT_TOPIC: &str = "public";

#[cfg(test)]
mod tests;
