use std::time::Duration;

/// Parameters of one run. Read by every worker, never mutated once the run
/// starts, so it is copied into each worker instead of shared behind a lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    /// Per-request deadline applied to each client. `None` means no deadline.
    pub timeout: Option<Duration>,
    /// Minimum delay between consecutive requests of the same worker.
    pub wait_between_requests: Duration,
    /// Number of concurrent workers.
    pub thread_count: usize,
    /// Number of requests each worker issues.
    pub request_count: usize,
    /// Issue one untimed request before the workers are released.
    pub warm: bool,
    /// Diagnostic flag; no effect on statistics.
    pub verbose: bool,
}

impl Settings {
    #[must_use]
    pub const fn new(thread_count: usize, request_count: usize) -> Self {
        Self {
            timeout: None,
            wait_between_requests: Duration::ZERO,
            thread_count,
            request_count,
            warm: false,
            verbose: false,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn with_wait_between_requests(mut self, wait: Duration) -> Self {
        self.wait_between_requests = wait;
        self
    }

    #[must_use]
    pub const fn with_warm(mut self, warm: bool) -> Self {
        self.warm = warm;
        self
    }

    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Total number of request slots in a run.
    #[must_use]
    pub const fn total_requests(&self) -> usize {
        self.thread_count.saturating_mul(self.request_count)
    }
}
