//! Measurement units printed next to values.

use clap::ValueEnum;
use strum_macros::{Display, EnumString};

/// Unit of a sensor value.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, ValueEnum, Display, EnumString, Eq, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum Unit {
    #[strum(serialize = "mA")]
    #[value(name = "mA", alias = "ma")]
    MilliAmps,
    #[strum(serialize = "A")]
    #[value(name = "A", alias = "a")]
    Amps,
    #[strum(serialize = "mV")]
    #[value(name = "mV", alias = "mv")]
    MilliVolts,
    #[strum(serialize = "V")]
    #[value(name = "V", alias = "v")]
    Volts,
    #[strum(serialize = "C")]
    #[value(name = "C", alias = "c")]
    Celsius,
    #[strum(serialize = "F")]
    #[value(name = "F", alias = "f")]
    Fahrenheit,
}
