//! Fixed-point temperature readings.
//!
//! The sensor sends its measurement as an ASCII integer in thousandths of a degree
//! Fahrenheit (`"72000"` is 72.0 °F). The server turns the payload into a `Reading` and
//! answers with a short acknowledgment built from it.
use std::fmt;

use crate::error::SensorError;
use crate::units::Unit;

/// Scale of the fixed-point payload.
pub const MILLI_SCALE: f64 = 1000.0;

/// A temperature decoded from one request payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Value in whole units.
    pub value: f64,
    /// Unit of `value`.
    pub unit: Unit,
}

impl Reading {
    /// Converts a milli-unit integer into a reading in Fahrenheit.
    pub fn from_milli(milli: i64) -> Self {
        Reading {
            value: milli as f64 / MILLI_SCALE,
            unit: Unit::Fahrenheit,
        }
    }

    /// Decodes a raw request payload.
    ///
    /// The payload must be UTF-8 text holding a signed integer; surrounding whitespace
    /// (a trailing newline from `nc`, for instance) is ignored.
    pub fn from_payload(payload: &[u8]) -> Result<Self, SensorError> {
        let text = std::str::from_utf8(payload)?;
        let digits = text.trim();
        if digits.is_empty() {
            return Err(SensorError::Protocol("empty payload".to_string()));
        }
        let milli: i64 = digits
            .parse()
            .map_err(|e| SensorError::Protocol(format!("{:?} is not an integer: {}", digits, e)))?;
        Ok(Self::from_milli(milli))
    }

    /// Text sent back to the client, e.g. `Received: 72.0 F`.
    pub fn acknowledgment(&self) -> String {
        format!("Received: {}", self)
    }
}

impl fmt::Display for Reading {
    // `Debug` for f64 always keeps a fractional part ("72.0", not "72").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.value, self.unit)
    }
}
