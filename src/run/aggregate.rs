use std::time::Duration;

use super::report::Report;
use super::result::WorkerResult;

/// Merges per-worker accumulators into one report, preserving worker order.
pub(crate) fn aggregate(overall_duration: Duration, results: Vec<WorkerResult>) -> Report {
    let slots = results
        .iter()
        .map(|result| result.latency.len())
        .fold(0usize, usize::saturating_add);
    let mut report = Report {
        overall_duration,
        latencies: Vec::with_capacity(slots),
        statuses: Vec::with_capacity(slots),
        ..Report::default()
    };

    for result in results {
        report.completed_count = report
            .completed_count
            .saturating_add(result.completed_count());
        report.error_count = report.error_count.saturating_add(result.error_count);

        for (status, count) in result.status_codes_count {
            let total = report.status_codes_frequency.entry(status).or_insert(0);
            *total = total.saturating_add(count);
        }

        report.latencies.extend(result.latency);
        report.statuses.extend(result.statuses);
    }

    report
}
