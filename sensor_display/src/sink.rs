//! Display sinks for the rolling window.
//!
//! A `DisplaySink` receives the whole current series on every update and redraws it.
//! Concrete sinks may be slow (terminal I/O, a GUI), so the ingestion loop never talks to
//! them directly: it hands frames to a `PlotWorker`, which owns the real sink on its own
//! thread and drops frames while a redraw is still in progress.
use crossbeam_channel::{Sender, TrySendError, bounded};
use log::{debug, error, trace};
use sensor_common::{SensorError, Unit};
use std::io::Write;
use std::thread::{self, JoinHandle};

/// Consumer of the current sample series.
pub trait DisplaySink {
    /// Replace whatever is shown with `series` (oldest sample first).
    fn replace_series(&mut self, series: &[f64]) -> Result<(), SensorError>;
}

/// Glyphs from lowest to highest.
const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Draws the series as a one-line unicode sparkline.
pub struct SparklineSink<W: Write> {
    out: W,
    unit: Unit,
    width: usize,
}

impl<W: Write> SparklineSink<W> {
    /// Create a sparkline of at most `width` columns written to `out`.
    pub fn new(out: W, unit: Unit, width: usize) -> Self {
        Self {
            out,
            unit,
            width: width.max(1),
        }
    }
}

impl<W: Write> DisplaySink for SparklineSink<W> {
    fn replace_series(&mut self, series: &[f64]) -> Result<(), SensorError> {
        let line = sparkline(series, self.width);
        writeln!(self.out, "\r{} |{}|", self.unit, line)
            .and_then(|_| self.out.flush())
            .map_err(|e| SensorError::Render(e.to_string()))
    }
}

/// Renders `series` into at most `width` glyphs, averaging samples that share a column.
pub fn sparkline(series: &[f64], width: usize) -> String {
    if series.is_empty() || width == 0 {
        return String::new();
    }

    let columns: Vec<f64> = if series.len() <= width {
        series.to_vec()
    } else {
        (0..width)
            .map(|col| {
                let start = col * series.len() / width;
                let end = ((col + 1) * series.len() / width).max(start + 1);
                let chunk = &series[start..end];
                chunk.iter().sum::<f64>() / chunk.len() as f64
            })
            .collect()
    };

    let low = columns.iter().copied().fold(f64::INFINITY, f64::min);
    let high = columns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = high - low;
    let top = BARS.len() - 1;

    columns
        .iter()
        .map(|value| {
            if span <= f64::EPSILON {
                BARS[top / 2]
            } else {
                let level = ((value - low) / span * top as f64).round() as usize;
                BARS[level.min(top)]
            }
        })
        .collect()
}

/// Sink used when no plot is requested; keeps the series visible at trace level.
pub struct LogSink;

impl DisplaySink for LogSink {
    fn replace_series(&mut self, series: &[f64]) -> Result<(), SensorError> {
        trace!(
            "Series updated: {} samples, latest {:?}",
            series.len(),
            series.last()
        );
        Ok(())
    }
}

/// Runs a sink on a background thread, fed through a single-slot channel.
pub struct PlotWorker {
    frames: Option<Sender<Vec<f64>>>,
    handle: Option<JoinHandle<()>>,
}

impl PlotWorker {
    /// Move `sink` onto a new render thread.
    pub fn spawn<S>(mut sink: S) -> Self
    where
        S: DisplaySink + Send + 'static,
    {
        let (frames_tx, frames_rx) = bounded::<Vec<f64>>(1);
        let handle = thread::spawn(move || {
            for frame in frames_rx.iter() {
                if let Err(e) = sink.replace_series(&frame) {
                    error!("Display sink failed: {}", e);
                }
            }
            debug!("Plot worker stopping...");
        });
        Self {
            frames: Some(frames_tx),
            handle: Some(handle),
        }
    }
}

impl DisplaySink for PlotWorker {
    fn replace_series(&mut self, series: &[f64]) -> Result<(), SensorError> {
        let frames = self
            .frames
            .as_ref()
            .ok_or_else(|| SensorError::Render("plot worker already stopped".to_string()))?;
        match frames.try_send(series.to_vec()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                debug!("Plot worker busy, frame dropped");
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => {
                Err(SensorError::Render("plot worker stopped".to_string()))
            }
        }
    }
}

impl Drop for PlotWorker {
    fn drop(&mut self) {
        self.frames.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Plot worker panicked");
            }
        }
    }
}
