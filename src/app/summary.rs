mod lines;

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use kurl::args::{KurlArgs, OutputFormat};
use kurl::error::AppResult;
use kurl::metrics::{ErrorPolicy, LatencyHistogram, LatencyStats};
use kurl::run::Report;

pub(crate) use lines::{latencies_line, summary_lines};

/// Scale of the fixed-point `_x100` values.
const PERCENT_DIVISOR: u64 = 100;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) struct LatencySummary {
    pub(crate) count: usize,
    pub(crate) min_ms: u64,
    pub(crate) avg_ms: u64,
    pub(crate) max_ms: u64,
    pub(crate) std_ms: u64,
    pub(crate) p50_us: u64,
    pub(crate) p90_us: u64,
    pub(crate) p99_us: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) total: usize,
    pub(crate) completed: usize,
    pub(crate) errors: usize,
    pub(crate) duration_ms: u64,
    pub(crate) status_codes: BTreeMap<u16, usize>,
    pub(crate) success_rate_x100: u64,
    pub(crate) rate_hz_x100: u64,
    pub(crate) ok_rate_hz_x100: u64,
    pub(crate) errors_skipped: bool,
    pub(crate) latency: LatencySummary,
}

impl RunSummary {
    pub(crate) fn from_report(report: &Report, policy: ErrorPolicy) -> Self {
        let stats = LatencyStats::from_report(report, policy);
        let (p50_us, p90_us, p99_us) = percentiles(report, policy);
        Self {
            total: report.total_requests(),
            completed: report.completed_count,
            errors: report.error_count,
            duration_ms: round_ms(report.overall_duration),
            status_codes: report.status_codes_frequency.clone(),
            success_rate_x100: report.success_rate_x100(),
            rate_hz_x100: report.rate_x100(report.total_requests()),
            ok_rate_hz_x100: report.rate_x100(report.status_count(200)),
            errors_skipped: policy == ErrorPolicy::Skip,
            latency: LatencySummary {
                count: stats.count,
                min_ms: stats.min.map_or(0, round_ms),
                avg_ms: stats.mean.map_or(0, round_ms),
                max_ms: stats.max.map_or(0, round_ms),
                std_ms: stats.std_dev.map_or(0, round_ms),
                p50_us,
                p90_us,
                p99_us,
            },
        }
    }
}

fn percentiles(report: &Report, policy: ErrorPolicy) -> (u64, u64, u64) {
    let histogram = match policy {
        ErrorPolicy::Include => LatencyHistogram::from_latencies(report.latencies.iter().copied()),
        ErrorPolicy::Skip => LatencyHistogram::from_latencies(report.successful_latencies()),
    };
    match histogram {
        Ok(histogram) => histogram.percentiles(),
        Err(err) => {
            warn!("Failed to compute percentiles: {}", err);
            (0, 0, 0)
        }
    }
}

/// Rounds to the nearest millisecond.
pub(crate) fn round_ms(duration: Duration) -> u64 {
    let rounded = duration
        .as_nanos()
        .saturating_add(500_000)
        .checked_div(1_000_000)
        .unwrap_or(0);
    u64::try_from(rounded).unwrap_or(u64::MAX)
}

pub(crate) fn print_report(report: &Report, args: &KurlArgs) -> AppResult<()> {
    if report.error_count != 0 {
        eprintln!("errors: {}", report.error_count);
    }

    let policy = if args.skip_errors {
        ErrorPolicy::Skip
    } else {
        ErrorPolicy::Include
    };

    match args.effective_output_format() {
        OutputFormat::Latencies => println!("{}", latencies_line(report)),
        OutputFormat::Json => {
            let summary = RunSummary::from_report(report, policy);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            let summary = RunSummary::from_report(report, policy);
            for line in summary_lines(&summary) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}
