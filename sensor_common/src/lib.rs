//!
//! Common types and utilities shared by the sensor display, the temperature server
//! and the probe client.
//!
//! This crate aggregates:
//! - `error` — unified error type `SensorError` used across the workspace.
//! - `result` — handy `Result<T, SensorError>` alias.
//! - `units` — measurement units shown next to values.
//! - `reading` — fixed-point temperature payloads and their acknowledgment text.
//! - `net` — networking constants and the single-shot request helper.
#![warn(missing_docs)]
pub mod error;
pub mod net;
pub mod reading;
pub mod result;
pub mod units;

pub use error::SensorError;
pub use reading::Reading;
pub use result::Result;
pub use units::Unit;
