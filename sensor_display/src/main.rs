//! Sensor Display — reads newline-delimited numeric samples from a serial device, keeps
//! the most recent 300 of them, and shows their average, minimum and maximum on a single
//! continuously rewritten console line. With `--plot`, the window is also drawn as a
//! sparkline after every sample.
//!
//! Usage example (CLI):
//! ```bash
//! sensor_display --port /dev/ttyUSB0 --baud 115200 --unit mA --plot
//! ```
//!
//! Lines that are not numbers are skipped. The program runs until Ctrl+C or until the
//! device disconnects; the latter is reported as an error.
#![warn(missing_docs)]
mod args;
mod console;
mod ingestor;
mod model;
mod serial;
mod sink;

use crate::args::Args;
use crate::console::StatusLine;
use crate::model::rolling_buffer::RollingBuffer;
use crate::sink::{LogSink, PlotWorker, SparklineSink};
use clap::Parser;
use log::{error, info};
use sensor_common::Result;
use sensor_common::SensorError;
use std::io;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Columns used by the sparkline.
const PLOT_WIDTH: usize = 60;

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

    let mut ingestor = serial::open(&args.port, args.baud)?;
    let mut buffer = RollingBuffer::default();
    let mut sink = if args.plot {
        PlotWorker::spawn(SparklineSink::new(io::stderr(), args.unit, PLOT_WIDTH))
    } else {
        PlotWorker::spawn(LogSink)
    };
    let mut status = StatusLine::new(io::stdout(), args.unit);

    let result = ingestor.run(&mut buffer, &mut sink, &mut status, &shutdown);
    status.finish()?;

    match result {
        Ok(()) => {
            println!("Ctrl-C");
            info!("Sensor display stopped");
            Ok(())
        }
        Err(e) => {
            error!("Ingestion stopped: {}", e);
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
