//! Continuously rewritten status line with the window statistics.
use crate::model::stats::Stats;
use sensor_common::Unit;
use std::io::{self, Write};

/// Significant digits shown for each statistic.
const DIGITS: usize = 6;
/// Minimum field width of each statistic.
const WIDTH: usize = 6;

/// Formats `value` with `digits` significant digits, right-aligned to `width`.
///
/// Fixed notation keeps at least one digit after the point and is used while the
/// decimal exponent lies in `-4..digits - 1`; anything else is written in scientific
/// notation with a signed, two-digit exponent (`1.23457e-05`, `1e+06`).
pub fn format_significant(value: f64, digits: usize, width: usize) -> String {
    let digits = digits.max(1);
    let text = if value == 0.0 || !value.is_finite() {
        format!("{:?}", value)
    } else {
        // Rounding to `digits` first gives the exponent of the value actually shown.
        let scientific = format!("{:.*e}", digits - 1, value);
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);

        if (-4..digits as i32 - 1).contains(&exponent) {
            let decimals = (digits as i32 - 1 - exponent) as usize;
            let fixed = format!("{:.*}", decimals, value);
            let fixed = fixed.trim_end_matches('0');
            if fixed.ends_with('.') {
                format!("{}0", fixed)
            } else {
                fixed.to_string()
            }
        } else {
            let mantissa = if mantissa.contains('.') {
                mantissa.trim_end_matches('0').trim_end_matches('.')
            } else {
                mantissa
            };
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
    };
    format!("{:>width$}", text, width = width)
}

/// Prints `Stats` on a single line, overwriting the previous one with `\r`.
pub struct StatusLine<W: Write> {
    out: W,
    unit: Unit,
}

impl<W: Write> StatusLine<W> {
    pub fn new(out: W, unit: Unit) -> Self {
        Self { out, unit }
    }

    pub fn print(&mut self, stats: &Stats) -> io::Result<()> {
        write!(
            self.out,
            "\rAverage: {}{unit}\tMin: {}{unit}\tMax: {}{unit}",
            format_significant(stats.average, DIGITS, WIDTH),
            format_significant(stats.min, DIGITS, WIDTH),
            format_significant(stats.max, DIGITS, WIDTH),
            unit = self.unit
        )?;
        self.out.flush()
    }

    /// Ends the status line so later output starts on a fresh line.
    pub fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }
}
