use tracing::info;

use kurl::args::KurlArgs;
use kurl::error::AppResult;
use kurl::http::{RequestSpec, build_request_specs};
use kurl::run::{Report, Settings, run, run_many};

pub(crate) fn settings_from_args(args: &KurlArgs) -> Settings {
    let settings = Settings::new(args.threads.get(), args.requests.get())
        .with_wait_between_requests(args.wait)
        .with_warm(args.warm)
        .with_verbose(args.verbose);
    match args.effective_timeout() {
        Some(timeout) => settings.with_timeout(timeout),
        None => settings,
    }
}

/// Hands descriptors to workers in round-robin order.
pub(crate) fn assign_round_robin(specs: &[RequestSpec], workers: usize) -> Vec<Option<RequestSpec>> {
    (0..workers)
        .map(|worker| {
            worker
                .checked_rem(specs.len())
                .and_then(|index| specs.get(index))
                .cloned()
        })
        .collect()
}

pub(crate) async fn run_local(args: &KurlArgs) -> AppResult<Report> {
    let settings = settings_from_args(args);
    let specs = build_request_specs(args)?;
    info!(
        "Running {} workers x {} requests against {} target(s)",
        settings.thread_count,
        settings.request_count,
        specs.len()
    );

    let report = if let [spec] = specs.as_slice() {
        run(settings, spec).await?
    } else {
        run_many(settings, assign_round_robin(&specs, settings.thread_count)).await?
    };
    Ok(report)
}
