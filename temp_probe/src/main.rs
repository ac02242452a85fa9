//! Temperature Probe — stands in for a Wi-Fi temperature sensor when testing the server
//! by hand. Sends one reading in thousandths of a degree Fahrenheit and prints the
//! server's acknowledgment.
//!
//! Usage example (CLI):
//! ```bash
//! temp_probe --server-ip 10.42.0.1 --millis 72000
//! ```
#![warn(missing_docs)]
use clap::Parser;
use log::{error, info};
use sensor_common::Result;
use sensor_common::SensorError;
use sensor_common::net::{SERVER_PORT, addr, request_reading};
use std::net::SocketAddr;
use std::time::Duration;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Server IP address (IPv4 or IPv6) where the temperature server is running.
    #[clap(long)]
    server_ip: String,

    /// Server TCP port.
    #[clap(long, default_value_t = SERVER_PORT)]
    port: u16,

    /// Reading to send, in thousandths of a degree (72000 = 72.0 F).
    #[clap(long, allow_hyphen_values = true)]
    millis: i64,

    /// Seconds to wait for the connection and the response.
    #[clap(long, default_value_t = 1)]
    timeout: u64,
}

fn main() -> Result<(), SensorError> {
    init_logger();
    let args = Args::parse();

    let server_ip = args.server_ip.trim().replace('"', "");
    let target = if server_ip.contains(':') {
        format!("[{}]:{}", server_ip, args.port)
    } else {
        addr(&server_ip, args.port)
    };
    let server: SocketAddr = target
        .parse()
        .map_err(|e| SensorError::Format(format!("Invalid server address {}: {}", target, e)))?;

    info!("Sending {} to {}", args.millis, server);
    match request_reading(server, args.millis, Duration::from_secs(args.timeout)) {
        Ok(response) if response.is_empty() => {
            error!("Server closed the connection without a response");
            Err(SensorError::Format("empty response".to_string()))
        }
        Ok(response) => {
            info!("Response: {:?}", response);
            Ok(())
        }
        Err(e) => {
            error!("Request failed: {}", e);
            Err(e)
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
