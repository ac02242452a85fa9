//! Opening the sensor's serial port.
use crate::ingestor::SignalIngestor;
use log::info;
use sensor_common::SensorError;
use serialport::{ClearBuffer, SerialPort};
use std::time::Duration;

/// How long one read waits for data before the shutdown flag is checked again.
pub const POLL_INTERVAL: Duration = Duration::from_millis(30);

/// Opens `path` at `baud` and discards whatever the device sent before we attached.
pub fn open(path: &str, baud: u32) -> Result<SignalIngestor<Box<dyn SerialPort>>, SensorError> {
    let port = serialport::new(path, baud)
        .timeout(POLL_INTERVAL)
        .open()
        .map_err(|e| SensorError::Device(format!("Failed to open {}: {}", path, e)))?;
    port.clear(ClearBuffer::Input)
        .map_err(|e| SensorError::Device(format!("Failed to clear {}: {}", path, e)))?;
    info!("Reading samples from {} at {} baud", path, baud);
    Ok(SignalIngestor::new(port))
}
