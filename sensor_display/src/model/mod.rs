//! Data model of the sensor display.
//!
//! - `rolling_buffer` — bounded window of the most recent samples.
//! - `stats` — average/min/max over that window.
pub mod rolling_buffer;
pub mod stats;
