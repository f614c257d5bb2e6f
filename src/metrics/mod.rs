//! Latency statistics and percentile helpers over a run report.
mod histogram;
mod latency;


pub use histogram::LatencyHistogram;
pub use latency::{ErrorPolicy, LatencyStats};
