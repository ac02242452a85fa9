//! Bounded window of the most recent samples.

/// Number of samples kept for statistics and plotting.
pub const WINDOW: usize = 300;

/// A single measurement parsed from one serial line.
pub type Sample = f64;

/// Ordered samples, oldest first, never longer than its capacity.
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    samples: Vec<Sample>,
    capacity: usize,
}

impl RollingBuffer {
    /// Create an empty buffer holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest ones once capacity is exceeded.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
        if self.samples.len() > self.capacity {
            let excess = self.samples.len() - self.capacity;
            self.samples.drain(..excess);
        }
    }

    /// Samples in arrival order.
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }
}

impl Default for RollingBuffer {
    fn default() -> Self {
        Self::new(WINDOW)
    }
}
