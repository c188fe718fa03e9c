//! The `transport` module is responsible for handling network communication
//! with clients via WebSockets.
//!
//! It defines the JSON frames exchanged with clients, the `Dispatcher` that
//! turns inbound frames into hub calls and fans the results out, and the
//! WebSocket server that owns the sockets.

pub mod dispatch;
pub mod message;
pub mod websocket;

pub use dispatch::Dispatcher;
pub use message::{ClientFrame, ServerFrame};
pub use websocket::{bind, serve, start_websocket_server};
