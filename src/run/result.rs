use std::collections::BTreeMap;
use std::time::Duration;

/// Accumulator owned by exactly one worker for the duration of a run.
///
/// Slots are appended in issue order, so after `request_count` iterations
/// `latency` and `statuses` each hold one entry per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct WorkerResult {
    pub(crate) error_count: usize,
    pub(crate) status_codes_count: BTreeMap<u16, usize>,
    pub(crate) latency: Vec<Duration>,
    pub(crate) statuses: Vec<Option<u16>>,
}

impl WorkerResult {
    pub(crate) fn with_capacity(request_count: usize) -> Self {
        Self {
            error_count: 0,
            status_codes_count: BTreeMap::new(),
            latency: Vec::with_capacity(request_count),
            statuses: Vec::with_capacity(request_count),
        }
    }

    pub(crate) fn record_status(&mut self, latency: Duration, status: u16) {
        let count = self.status_codes_count.entry(status).or_insert(0);
        *count = count.saturating_add(1);
        self.latency.push(latency);
        self.statuses.push(Some(status));
    }

    /// Records a transport failure. The slot keeps the time spent waiting for
    /// the failure, not zero.
    pub(crate) fn record_error(&mut self, latency: Duration) {
        self.error_count = self.error_count.saturating_add(1);
        self.latency.push(latency);
        self.statuses.push(None);
    }

    pub(crate) fn completed_count(&self) -> usize {
        self.latency.len().saturating_sub(self.error_count)
    }
}
