use std::time::Duration;

use crate::run::Report;

/// Which request slots feed the statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Every slot, including failed requests with the time spent failing.
    #[default]
    Include,
    /// Only requests that yielded an HTTP status.
    Skip,
}

/// Descriptive statistics over a set of latencies.
///
/// `min` and `max` are tracked independently, so a single sample is both.
/// `std_dev` is the sample standard deviation (n - 1 denominator) and needs
/// at least two samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyStats {
    pub count: usize,
    pub min: Option<Duration>,
    pub max: Option<Duration>,
    pub mean: Option<Duration>,
    pub std_dev: Option<Duration>,
}

impl LatencyStats {
    #[must_use]
    pub fn from_report(report: &Report, policy: ErrorPolicy) -> Self {
        match policy {
            ErrorPolicy::Include => Self::from_samples(report.latencies.iter().copied()),
            ErrorPolicy::Skip => Self::from_samples(report.successful_latencies()),
        }
    }

    #[must_use]
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = Duration>,
    {
        let nanos: Vec<u128> = samples
            .into_iter()
            .map(|sample| sample.as_nanos())
            .collect();
        let count = nanos.len();
        if count == 0 {
            return Self::default();
        }

        let min = nanos.iter().copied().min();
        let max = nanos.iter().copied().max();
        let sum = nanos.iter().copied().fold(0u128, u128::saturating_add);
        let mean = sum.checked_div(count as u128).unwrap_or(0);

        let std_dev = if count < 2 {
            None
        } else {
            let squares = nanos
                .iter()
                .map(|value| {
                    let diff = value.abs_diff(mean);
                    diff.saturating_mul(diff)
                })
                .fold(0u128, u128::saturating_add);
            let variance = squares
                .checked_div(count.saturating_sub(1) as u128)
                .unwrap_or(0);
            Some(nanos_to_duration(variance.isqrt()))
        };

        Self {
            count,
            min: min.map(nanos_to_duration),
            max: max.map(nanos_to_duration),
            mean: Some(nanos_to_duration(mean)),
            std_dev,
        }
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
