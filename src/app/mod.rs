mod runner;
mod summary;


use kurl::args::KurlArgs;
use kurl::error::AppResult;

/// Runs the load test described by `args` and prints the result.
pub(crate) async fn run(args: KurlArgs) -> AppResult<()> {
    let report = runner::run_local(&args).await?;
    summary::print_report(&report, &args)
}
