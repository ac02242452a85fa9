//! Listening socket and the per-connection temperature exchange.
use log::{debug, error, info, warn};
use sensor_common::net::MAX_REQUEST_BYTES;
use sensor_common::{Reading, SensorError};
use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Pause between accept attempts while no client is waiting.
pub const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Upper bound on how long one client may stall a read or write.
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// TCP receiver that serves one temperature exchange per connection.
///
/// Connections are handled strictly one after another on the calling thread. A client
/// that sends garbage only loses its own connection; the listener keeps serving.
pub struct TempReceiver {
    /// The underlying TCP listening socket.
    pub(crate) socket: TcpListener,
}

impl TempReceiver {
    /// Bind a new receiver to `bind_addr` (e.g., `10.42.0.1:4000`).
    pub fn bind(bind_addr: &str) -> Result<Self, SensorError> {
        let socket = TcpListener::bind(bind_addr).map_err(|source| SensorError::Bind {
            addr: bind_addr.to_string(),
            source,
        })?;
        socket.set_nonblocking(true)?;
        Ok(Self { socket })
    }

    /// Address actually bound (useful when binding port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, SensorError> {
        Ok(self.socket.local_addr()?)
    }

    /// Accept and serve connections until `shutdown` is raised.
    ///
    /// The listener is non-blocking so the flag is observed within
    /// `ACCEPT_POLL_INTERVAL` even when no client shows up.
    pub fn serve(&self, shutdown: &AtomicBool) -> Result<(), SensorError> {
        info!("Listening on {}", self.socket.local_addr()?);

        while !shutdown.load(Ordering::Relaxed) {
            match self.socket.accept() {
                Ok((stream, peer)) => {
                    debug!("Accepted connection from {}", peer);
                    if let Err(e) = serve_client(stream) {
                        warn!("Dropped request from {}: {}", peer, e);
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    error!("TCP connection error: {}", e);
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
            }
        }
        Ok(())
    }
}

/// Prepares an accepted socket and runs the exchange; the socket closes on return.
fn serve_client(mut stream: TcpStream) -> Result<(), SensorError> {
    stream.set_nonblocking(false)?;
    stream.set_read_timeout(Some(CLIENT_TIMEOUT))?;
    stream.set_write_timeout(Some(CLIENT_TIMEOUT))?;
    let reading = handle_connection(&mut stream)?;
    info!("{}", reading.acknowledgment());
    Ok(())
}

/// Runs one request/response exchange on `stream`.
///
/// Reads a single chunk of at most `MAX_REQUEST_BYTES`, decodes it as a fixed-point
/// reading and writes back the acknowledgment. Malformed payloads get no response.
pub fn handle_connection<S: Read + Write>(stream: &mut S) -> Result<Reading, SensorError> {
    let mut buf = [0u8; MAX_REQUEST_BYTES];
    let size = stream.read(&mut buf)?;
    let reading = Reading::from_payload(&buf[..size])?;
    stream.write_all(reading.acknowledgment().as_bytes())?;
    stream.flush()?;
    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// In-memory duplex stream: reads from `input`, collects writes in `output`.
    struct Duplex {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl Duplex {
        fn new(input: &[u8]) -> Self {
            Self {
                input: Cursor::new(input.to_vec()),
                output: Vec::new(),
            }
        }
    }

    impl Read for Duplex {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for Duplex {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn answers_with_converted_reading() {
        let mut stream = Duplex::new(b"72000");
        let reading = handle_connection(&mut stream).unwrap();
        assert_eq!(reading.value, 72.0);
        assert_eq!(stream.output, b"Received: 72.0 F");
    }

    #[test]
    fn answers_zero() {
        let mut stream = Duplex::new(b"0");
        handle_connection(&mut stream).unwrap();
        assert_eq!(stream.output, b"Received: 0.0 F");
    }

    #[test]
    fn malformed_payload_gets_no_response() {
        let mut stream = Duplex::new(b"abc");
        let err = handle_connection(&mut stream).unwrap_err();
        assert!(matches!(err, SensorError::Protocol(_)));
        assert!(stream.output.is_empty());
    }

    #[test]
    fn reads_at_most_one_chunk() {
        let mut payload = vec![b'1'; MAX_REQUEST_BYTES];
        payload.extend_from_slice(b"999");
        let mut stream = Duplex::new(&payload);
        // 1000 digits overflow i64, so the chunk is rejected rather than merged.
        assert!(handle_connection(&mut stream).is_err());
        assert_eq!(stream.input.position() as usize, MAX_REQUEST_BYTES);
    }

    #[test]
    fn bind_failure_is_reported() {
        let first = TempReceiver::bind("127.0.0.1:0").unwrap();
        let taken = first.local_addr().unwrap().to_string();
        let err = TempReceiver::bind(&taken).err().unwrap();
        assert!(matches!(err, SensorError::Bind { .. }));
    }
}
