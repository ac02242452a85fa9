//! Summary statistics over the rolling window.
use sensor_common::SensorError;

/// Average, minimum and maximum of a non-empty series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Computes `Stats` over `samples`.
///
/// Returns `SensorError::EmptyBuffer` when there is nothing to summarize.
pub fn compute_stats(samples: &[f64]) -> Result<Stats, SensorError> {
    let (first, rest) = samples.split_first().ok_or(SensorError::EmptyBuffer)?;

    let mut sum = *first;
    let mut min = *first;
    let mut max = *first;
    for &value in rest {
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    Ok(Stats {
        average: sum / samples.len() as f64,
        min,
        max,
    })
}
