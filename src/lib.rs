//! Core library for the `kurl` HTTP load generator.
//!
//! A run spawns a fixed number of workers, each with its own HTTP client and a
//! fixed number of requests. Workers are released together through a start
//! barrier, optionally after one untimed warm-up request, and their private
//! results are merged into one [`run::Report`] with per-request latencies, a
//! status code histogram and the wall-clock duration of the run. The
//! [`metrics`] module derives summary statistics from a report.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod run;

pub use run::{Report, ResponseTest, Settings, run, run_many, run_many_test};
