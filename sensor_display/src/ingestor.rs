//! Serial line ingestion.
//!
//! `SignalIngestor` turns a byte stream of newline-delimited ASCII floats into samples,
//! keeps them in a `RollingBuffer`, and after every accepted sample recomputes the
//! statistics, forwards the window to the display sink and rewrites the status line.
//!
//! Waiting for data relies on the source's read timeout: a timed-out read means "nothing
//! yet", the shutdown flag is checked, and the read is retried. End of stream or any other
//! I/O error means the device is gone and ends the loop.
use crate::console::StatusLine;
use crate::model::rolling_buffer::{RollingBuffer, Sample};
use crate::model::stats::compute_stats;
use crate::sink::DisplaySink;
use log::{debug, warn};
use sensor_common::SensorError;
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Longest line accepted from the device, terminator included.
pub const MAX_LINE_BYTES: usize = 1024;

/// Parses one serial line into a sample.
///
/// Whitespace is stripped; anything that is not a finite number is rejected.
pub fn parse_line(bytes: &[u8]) -> Result<Sample, SensorError> {
    let text = String::from_utf8_lossy(bytes);
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SensorError::Parse {
            line: trimmed.to_string(),
        }),
    }
}

/// Forwards the window to `sink`; failures are logged and never stop ingestion.
pub fn render<S: DisplaySink + ?Sized>(sink: &mut S, buffer: &RollingBuffer) {
    if let Err(e) = sink.replace_series(buffer.as_slice()) {
        warn!("Render failed: {}", e);
    }
}

/// Reads sample lines from a serial source.
pub struct SignalIngestor<R: Read> {
    reader: BufReader<R>,
    /// Bytes of a line whose terminator has not arrived yet.
    pending: Vec<u8>,
    /// Set after an over-long line; bytes are dropped until the next `\n`.
    discarding: bool,
}

impl<R: Read> SignalIngestor<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
            pending: Vec::new(),
            discarding: false,
        }
    }

    /// One read attempt: `Ok(None)` when the source timed out before a full line.
    fn read_line(&mut self) -> Result<Option<Vec<u8>>, SensorError> {
        let had_pending = !self.pending.is_empty();
        let room = MAX_LINE_BYTES.saturating_sub(self.pending.len()) as u64;
        match (&mut self.reader).take(room).read_until(b'\n', &mut self.pending) {
            Ok(0) if !had_pending => Err(SensorError::Disconnected(
                "serial stream ended".to_string(),
            )),
            Ok(_) => {
                let terminated = self.pending.last() == Some(&b'\n');
                if !terminated && self.pending.len() >= MAX_LINE_BYTES {
                    warn!(
                        "Discarding {} bytes received without a line terminator",
                        self.pending.len()
                    );
                    self.pending.clear();
                    self.discarding = true;
                    return Ok(None);
                }
                // A line without terminator is only returned at end of stream.
                let line = std::mem::take(&mut self.pending);
                if self.discarding {
                    self.discarding = false;
                    debug!("Dropped {} trailing bytes of an over-long line", line.len());
                    return Ok(None);
                }
                Ok(Some(line))
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => Ok(None),
            Err(e) => Err(SensorError::Io(e)),
        }
    }

    /// Blocks until a complete line is available.
    ///
    /// Returns `Ok(None)` once `shutdown` is raised, and an error when the device
    /// disconnects.
    pub fn poll(&mut self, shutdown: &AtomicBool) -> Result<Option<Vec<u8>>, SensorError> {
        while !shutdown.load(Ordering::Relaxed) {
            if let Some(line) = self.read_line()? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// Runs the ingestion loop until shutdown or device failure.
    pub fn run<S, W>(
        &mut self,
        buffer: &mut RollingBuffer,
        sink: &mut S,
        status: &mut StatusLine<W>,
        shutdown: &AtomicBool,
    ) -> Result<(), SensorError>
    where
        S: DisplaySink + ?Sized,
        W: Write,
    {
        while let Some(line) = self.poll(shutdown)? {
            let sample = match parse_line(&line) {
                Ok(sample) => sample,
                Err(e) => {
                    debug!("Skipping line: {}", e);
                    continue;
                }
            };
            buffer.push(sample);
            let stats = compute_stats(buffer.as_slice())?;
            render(sink, buffer);
            status.print(&stats)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_common::Unit;
    use std::collections::VecDeque;
    use std::io::{self, Cursor};

    /// Reader that replays scripted chunks, reporting a timeout for each `None`.
    struct ScriptedReader {
        steps: VecDeque<Option<Vec<u8>>>,
    }

    impl ScriptedReader {
        fn new(steps: Vec<Option<&[u8]>>) -> Self {
            Self {
                steps: steps.into_iter().map(|s| s.map(<[u8]>::to_vec)).collect(),
            }
        }
    }

    impl Read for ScriptedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.steps.pop_front() {
                Some(Some(chunk)) => {
                    let n = chunk.len().min(buf.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    Ok(n)
                }
                Some(None) => Err(io::Error::new(ErrorKind::TimedOut, "no data")),
                None => Ok(0),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<Vec<f64>>,
        fail: bool,
    }

    impl DisplaySink for RecordingSink {
        fn replace_series(&mut self, series: &[f64]) -> Result<(), SensorError> {
            self.frames.push(series.to_vec());
            if self.fail {
                Err(SensorError::Render("window closed".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn parses_numbers_with_whitespace() {
        assert_eq!(parse_line(b" 12.5\r\n").unwrap(), 12.5);
        assert_eq!(parse_line(b"-3").unwrap(), -3.0);
        assert_eq!(parse_line(b"1e3\n").unwrap(), 1000.0);
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in [&b"abc"[..], b"", b"12.3.4", b"\n", b"nan", b"inf", &[0xff, b'1'][..]] {
            assert!(
                matches!(parse_line(line), Err(SensorError::Parse { .. })),
                "{:?}",
                line
            );
        }
    }

    #[test]
    fn poll_joins_chunks_across_timeouts() {
        let reader = ScriptedReader::new(vec![
            None,
            Some(&b"12"[..]),
            None,
            Some(&b".5\n3"[..]),
            None,
            Some(&b"\n"[..]),
        ]);
        let mut ingestor = SignalIngestor::new(reader);
        let shutdown = AtomicBool::new(false);

        assert_eq!(ingestor.poll(&shutdown).unwrap().unwrap(), b"12.5\n");
        assert_eq!(ingestor.poll(&shutdown).unwrap().unwrap(), b"3\n");
        assert!(matches!(
            ingestor.poll(&shutdown),
            Err(SensorError::Disconnected(_))
        ));
    }

    #[test]
    fn over_long_line_is_discarded_up_to_next_newline() {
        let flood = vec![b'7'; MAX_LINE_BYTES + 500];
        let reader = ScriptedReader::new(vec![
            Some(&flood[..]),
            None,
            Some(&b"99\n2.5\n"[..]),
        ]);
        let mut ingestor = SignalIngestor::new(reader);
        let shutdown = AtomicBool::new(false);

        assert_eq!(ingestor.poll(&shutdown).unwrap().unwrap(), b"2.5\n");
        assert!(ingestor.pending.is_empty());
        assert!(!ingestor.discarding);
    }

    #[test]
    fn line_at_the_limit_is_kept() {
        let mut line = vec![b'1'; MAX_LINE_BYTES - 1];
        line.push(b'\n');
        let mut ingestor = SignalIngestor::new(Cursor::new(line.clone()));
        let shutdown = AtomicBool::new(false);
        assert_eq!(ingestor.poll(&shutdown).unwrap().unwrap(), line);
    }

    #[test]
    fn poll_returns_none_after_shutdown() {
        let mut ingestor = SignalIngestor::new(Cursor::new(b"1\n".to_vec()));
        let shutdown = AtomicBool::new(true);
        assert!(ingestor.poll(&shutdown).unwrap().is_none());
    }

    #[test]
    fn unterminated_last_line_is_still_delivered() {
        let mut ingestor = SignalIngestor::new(Cursor::new(b"4.25".to_vec()));
        let shutdown = AtomicBool::new(false);
        assert_eq!(ingestor.poll(&shutdown).unwrap().unwrap(), b"4.25");
        assert!(ingestor.poll(&shutdown).is_err());
    }

    #[test]
    fn other_io_errors_are_fatal() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(ErrorKind::BrokenPipe, "unplugged"))
            }
        }
        let mut ingestor = SignalIngestor::new(Broken);
        let shutdown = AtomicBool::new(false);
        assert!(matches!(ingestor.poll(&shutdown), Err(SensorError::Io(_))));
    }

    #[test]
    fn run_skips_bad_lines_and_updates_everything() {
        let input = b"1\nabc\n\n2\n12.3.4\n".to_vec();
        let mut ingestor = SignalIngestor::new(Cursor::new(input));
        let mut buffer = RollingBuffer::default();
        let mut sink = RecordingSink::default();
        let mut out = Vec::new();
        let mut status = StatusLine::new(&mut out, Unit::MilliAmps);
        let shutdown = AtomicBool::new(false);

        let result = ingestor.run(&mut buffer, &mut sink, &mut status, &shutdown);

        assert!(matches!(result, Err(SensorError::Disconnected(_))));
        assert_eq!(buffer.as_slice(), &[1.0, 2.0]);
        assert_eq!(sink.frames, vec![vec![1.0], vec![1.0, 2.0]]);
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("\rAverage:    1.5mA\tMin:    1.0mA\tMax:    2.0mA"));
    }

    #[test]
    fn run_survives_render_failures() {
        let mut ingestor = SignalIngestor::new(Cursor::new(b"5\n6\n".to_vec()));
        let mut buffer = RollingBuffer::default();
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let mut status = StatusLine::new(io::sink(), Unit::Volts);
        let shutdown = AtomicBool::new(false);

        let _ = ingestor.run(&mut buffer, &mut sink, &mut status, &shutdown);

        assert_eq!(sink.frames.len(), 2);
        assert_eq!(buffer.as_slice(), &[5.0, 6.0]);
    }

    #[test]
    fn run_keeps_only_latest_window() {
        let input: String = (0..750).map(|i| format!("{}\n", i)).collect();
        let mut ingestor = SignalIngestor::new(Cursor::new(input.into_bytes()));
        let mut buffer = RollingBuffer::default();
        let mut sink = RecordingSink::default();
        let mut status = StatusLine::new(io::sink(), Unit::MilliAmps);
        let shutdown = AtomicBool::new(false);

        let _ = ingestor.run(&mut buffer, &mut sink, &mut status, &shutdown);

        let expected: Vec<f64> = (450..750).map(|i| i as f64).collect();
        assert_eq!(buffer.as_slice(), expected.as_slice());
        assert!(sink.frames.iter().all(|frame| frame.len() <= 300));
    }
}
