//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `chathub` application.
//!
//! This module centralizes the typed error definitions and the tracing
//! subscriber setup shared by the library and the binary.

pub mod error;
pub mod logging;
