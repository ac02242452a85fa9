//! Temperature TCP server.
//!
//! Listens on a fixed address (the sensors' access-point interface by default) and
//! serves one exchange per connection:
//!
//! - the sensor sends its temperature in thousandths of a degree Fahrenheit as ASCII
//!   digits, e.g. `72000`;
//! - the server answers `Received: 72.0 F` and closes the connection.
//!
//! Connections are served one at a time. A malformed payload is logged and only that
//! connection is dropped. Ctrl+C stops the accept loop and releases the socket.
#![warn(missing_docs)]
use chrono::Local;
use clap::Parser;
use log::info;
use sensor_common::Result;
use sensor_common::SensorError;
use sensor_common::net::{DEFAULT_SERVER_IP, SERVER_PORT, addr};
use std::io::Write;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use temp_server::TempReceiver;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// IP address to bind.
    #[clap(long, default_value = DEFAULT_SERVER_IP)]
    address: String,

    /// TCP port to bind.
    #[clap(long, default_value_t = SERVER_PORT)]
    port: u16,
}

fn main() -> Result<(), SensorError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| SensorError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    let receiver = TempReceiver::bind(&addr(&args.address, args.port))?;
    receiver.serve(&shutdown)?;

    println!("shutting down");
    drop(receiver);
    info!("Listener closed");
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {}",
                Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.args()
            )
        })
        .init();
}
