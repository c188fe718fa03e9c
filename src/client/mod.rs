//! The `client` module holds the transport side of a connection.
//!
//! The hub decides *who* receives a message; this module knows *how* to reach
//! them. Each connected socket gets a `Client` with the sending half of an
//! unbounded channel, and the `ClientRegistry` maps connection ids to those
//! channels so the transport can fan out a serialized frame.

pub mod handle;
pub mod registry;

pub use handle::Client;
pub use registry::ClientRegistry;
