//! Command-line arguments for the sensor display.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use sensor_common::Unit;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Serial device the sensor board is attached to.
    #[clap(long, default_value = "/dev/ttyUSB0")]
    pub port: String,

    /// Serial baud rate.
    #[clap(long, default_value_t = 115_200)]
    pub baud: u32,

    /// Unit printed next to the statistics.
    #[clap(long, value_enum, default_value = "mA")]
    pub unit: Unit,

    /// Draw a sparkline of the window on stderr after every sample.
    #[clap(long)]
    pub plot: bool,
}
