//! Shared networking constants and helpers used by the server and the probe.
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use log::debug;

use crate::error::SensorError;

/// TCP port the temperature server listens on.
pub const SERVER_PORT: u16 = 4000;
/// Address of the access-point interface the sensors connect through.
pub const DEFAULT_SERVER_IP: &str = "10.42.0.1";
/// Largest request payload read from one connection.
pub const MAX_REQUEST_BYTES: usize = 1000;

/// Helper to format an IP address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Performs one single-shot exchange with the temperature server.
///
/// Sends `milli` as ASCII digits, half-closes the write side and reads the response
/// until the server closes the connection.
pub fn request_reading(
    server: SocketAddr,
    milli: i64,
    timeout: Duration,
) -> Result<String, SensorError> {
    let mut stream = TcpStream::connect_timeout(&server, timeout)?;
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;

    let payload = milli.to_string();
    debug!("Sending {:?} to {}", payload, server);
    stream.write_all(payload.as_bytes())?;
    stream.flush()?;
    stream.shutdown(Shutdown::Write)?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response)?;
    String::from_utf8(response)
        .map_err(|e| SensorError::Format(format!("response is not UTF-8: {}", e)))
}
