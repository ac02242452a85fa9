//! Error types shared between the display, the server and the probe.
//!
//! `SensorError` covers I/O, text decoding, parsing of samples and payloads, and the
//! few fatal conditions each binary reports before exiting.
use std::io;
use std::str::Utf8Error;

use thiserror::Error;

/// Unified error type for the workspace.
#[derive(Error, Debug)]
pub enum SensorError {
    /// I/O error originating from sockets, the serial port or the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Payload or line bytes were not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] Utf8Error),

    /// A serial line could not be parsed as a floating-point sample.
    #[error("Parse error: {line:?} is not a number")]
    Parse {
        /// The offending line, whitespace stripped.
        line: String,
    },

    /// A request payload was not an ASCII integer.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Statistics were requested over an empty buffer.
    #[error("Cannot compute statistics over an empty buffer")]
    EmptyBuffer,

    /// The listening socket could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The serial device stopped producing data (unplugged, end of stream).
    #[error("Device disconnected: {0}")]
    Disconnected(String),

    /// The serial device could not be opened or configured.
    #[error("Device error: {0}")]
    Device(String),

    /// The display sink failed to redraw.
    #[error("Render error: {0}")]
    Render(String),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),
}
