//! Single-shot temperature server.
//!
//! Sensors open a TCP connection, send one fixed-point temperature as ASCII digits, read
//! back a short acknowledgment and are disconnected. `receiver` holds the listener and the
//! per-connection exchange; the binary in `main.rs` only wires arguments, logging and
//! Ctrl+C handling around it.
#![warn(missing_docs)]
pub mod receiver;

pub use receiver::{TempReceiver, handle_connection};
