//! Barrier-released worker pool and result aggregation.
//!
//! A run spawns one worker per thread. Each worker builds its own HTTP client,
//! signals ready and parks on a start gate. Once every worker is ready (and
//! the optional warm-up request succeeded) the gate opens and the clock
//! starts. Workers then issue their requests independently into private
//! accumulators, which are merged into a [`Report`] after the last worker is
//! joined.
mod aggregate;
mod barrier;
mod orchestrator;
mod report;
mod result;
mod settings;
mod warmup;
mod worker;


pub use orchestrator::{run, run_many, run_many_test};
pub use report::Report;
pub use settings::Settings;
pub use worker::ResponseTest;
