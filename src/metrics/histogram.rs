use std::time::Duration;

use hdrhistogram::Histogram;

/// Latency percentiles over microsecond samples.
#[derive(Debug)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new latency histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, String> {
        let hist = Histogram::<u64>::new(3)
            .map_err(|err| format!("Failed to create histogram: {}", err))?;
        Ok(Self { hist })
    }

    /// Build a histogram from a set of latencies.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created or a value cannot
    /// be recorded.
    pub fn from_latencies<I>(latencies: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = Duration>,
    {
        let mut histogram = Self::new()?;
        for latency in latencies {
            histogram.record(latency)?;
        }
        Ok(histogram)
    }

    /// Record one latency. Sub-microsecond values count as one microsecond.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be recorded.
    pub fn record(&mut self, latency: Duration) -> Result<(), String> {
        let micros = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
        self.hist
            .record(micros.max(1))
            .map_err(|err| format!("Failed to record latency: {}", err))
    }

    /// p50, p90 and p99 in microseconds; zeros when empty.
    #[must_use]
    pub fn percentiles(&self) -> (u64, u64, u64) {
        if self.count() == 0 {
            return (0, 0, 0);
        }

        (
            self.hist.value_at_quantile(0.5),
            self.hist.value_at_quantile(0.9),
            self.hist.value_at_quantile(0.99),
        )
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }
}
