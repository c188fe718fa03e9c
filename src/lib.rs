//! # chathub
//!
//! `chathub` is a minimal, in-memory chat broadcast hub built with Rust.
//! Clients connect over WebSockets, join with a display name and every chat
//! message they send is fanned out to all connections on the shared topic,
//! together with join and leave announcements.
//!
//! ## Core Modules
//!
//! - `hub`: connection registry, display names, message stamping and fan-out snapshots.
//! - `client`: per-socket outbound channels used by the transport.
//! - `config`: loading and merging server configuration.
//! - `transport`: the WebSocket server and the frame dispatcher.
//! - `utils`: typed errors and logging setup.

pub mod client;
pub mod config;
pub mod hub;
pub mod transport;
pub mod utils;
