use reqwest::StatusCode;

use kurl::run::Report;

use super::{PERCENT_DIVISOR, RunSummary, round_ms};

/// Microseconds per millisecond.
const US_PER_MS: u64 = 1_000;
/// Rounding offset for `_x100` values.
const X100_ROUNDING: u64 = 50;

pub(crate) fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("total: {}", summary.total));

    for (status, count) in &summary.status_codes {
        let percent = percent_of(*count, summary.total);
        lines.push(format!(
            "status code {}: {} {}% ({})",
            status,
            count,
            percent,
            status_reason(*status)
        ));
    }

    lines.push(format!("duration: {}ms", summary.duration_ms));

    let latency = &summary.latency;
    lines.push(format!(
        "latency  min: {}ms, avg: {}ms, max: {}ms (std: {}ms)",
        latency.min_ms, latency.avg_ms, latency.max_ms, latency.std_ms
    ));
    lines.push(format!(
        "latency  p50: {}, p90: {}, p99: {}",
        format_micros(latency.p50_us),
        format_micros(latency.p90_us),
        format_micros(latency.p99_us)
    ));
    if summary.errors_skipped {
        lines.push(format!(
            "latency computed over {} successful requests",
            latency.count
        ));
    }

    lines.push(format!("rate: {} Hz", round_x100(summary.rate_hz_x100)));
    lines.push(format!("200 rate: {} Hz", round_x100(summary.ok_rate_hz_x100)));
    lines
}

/// Space-separated latencies rounded to whole milliseconds, in report order.
pub(crate) fn latencies_line(report: &Report) -> String {
    report
        .latencies
        .iter()
        .map(|latency| round_ms(*latency).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("unknown")
}

/// Integer percent, truncated.
fn percent_of(count: usize, total: usize) -> u64 {
    let scaled = (count as u128)
        .saturating_mul(u128::from(PERCENT_DIVISOR))
        .checked_div(total as u128)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn round_x100(value: u64) -> u64 {
    value
        .saturating_add(X100_ROUNDING)
        .checked_div(PERCENT_DIVISOR)
        .unwrap_or(0)
}

fn format_micros(value_us: u64) -> String {
    let whole = value_us.checked_div(US_PER_MS).unwrap_or(0);
    let fraction = value_us.checked_rem(US_PER_MS).unwrap_or(0);
    format!("{}.{:03}ms", whole, fraction)
}
