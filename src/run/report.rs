use std::collections::BTreeMap;
use std::time::Duration;

/// Aggregate outcome of one run.
///
/// `latencies` and `statuses` are worker-major: worker 0's requests in issue
/// order first, then worker 1's, and so on. A `None` status marks a request
/// that failed before yielding an HTTP status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Requests that yielded an HTTP status, whatever its value.
    pub completed_count: usize,
    /// Requests that failed before yielding an HTTP status.
    pub error_count: usize,
    /// Wall-clock time from gate release to the last worker finishing.
    pub overall_duration: Duration,
    /// One latency per request slot.
    pub latencies: Vec<Duration>,
    /// One outcome per request slot, aligned with `latencies`.
    pub statuses: Vec<Option<u16>>,
    /// Status code to number of occurrences.
    pub status_codes_frequency: BTreeMap<u16, usize>,
}

/// Divisor used by the x100 fixed-point helpers.
const PERCENT_SCALE: u128 = 10_000;
/// Nanoseconds per second, times 100.
const RATE_SCALE_NS: u128 = 100_000_000_000;

impl Report {
    /// Total number of request slots, successful or not.
    #[must_use]
    pub const fn total_requests(&self) -> usize {
        self.completed_count.saturating_add(self.error_count)
    }

    /// Occurrences of one status code.
    #[must_use]
    pub fn status_count(&self, status: u16) -> usize {
        self.status_codes_frequency
            .get(&status)
            .copied()
            .unwrap_or(0)
    }

    /// Latencies of requests that yielded an HTTP status, in report order.
    pub fn successful_latencies(&self) -> impl Iterator<Item = Duration> + '_ {
        self.latencies
            .iter()
            .zip(self.statuses.iter())
            .filter_map(|(latency, status)| status.map(|_| *latency))
    }

    /// Share of completed requests in percent, scaled by 100.
    #[must_use]
    pub fn success_rate_x100(&self) -> u64 {
        ratio_x100(self.completed_count, self.total_requests())
    }

    /// Share of one status code among all requests in percent, scaled by 100.
    #[must_use]
    pub fn status_ratio_x100(&self, status: u16) -> u64 {
        ratio_x100(self.status_count(status), self.total_requests())
    }

    /// `count` requests per second over the measured window, scaled by 100.
    #[must_use]
    pub fn rate_x100(&self, count: usize) -> u64 {
        let duration_ns = self.overall_duration.as_nanos().max(1);
        let scaled = (count as u128)
            .saturating_mul(RATE_SCALE_NS)
            .checked_div(duration_ns)
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}

fn ratio_x100(part: usize, total: usize) -> u64 {
    if total == 0 {
        return 0;
    }
    let scaled = (part as u128)
        .saturating_mul(PERCENT_SCALE)
        .checked_div(total as u128)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
