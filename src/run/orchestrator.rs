use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::RunError;
use crate::http::RequestSpec;

use super::aggregate::aggregate;
use super::barrier::StartGate;
use super::report::Report;
use super::result::WorkerResult;
use super::settings::Settings;
use super::warmup::warm_up;
use super::worker::{ResponseTest, Worker};

/// Runs `settings.thread_count` workers that all issue the same request.
///
/// # Errors
///
/// Returns an error when `settings.request_count` is zero, when the warm-up
/// request fails, or when a worker cannot be set up.
pub async fn run(settings: Settings, request: &RequestSpec) -> Result<Report, RunError> {
    let requests = vec![Some(request.clone()); settings.thread_count];
    run_many(settings, requests).await
}

/// Runs one worker per request descriptor, without response tests.
///
/// # Errors
///
/// Returns an error when `requests.len()` differs from the thread count, when
/// an entry is `None`, when `settings.request_count` is zero, when the warm-up
/// request fails, or when a worker cannot be set up.
pub async fn run_many(
    settings: Settings,
    requests: Vec<Option<RequestSpec>>,
) -> Result<Report, RunError> {
    let tests = vec![None; settings.thread_count];
    run_many_test(settings, requests, tests).await
}

/// Runs one worker per request descriptor, each with an optional response
/// test.
///
/// Every worker builds its client and signals ready before any of them is
/// released; the measured duration starts when the gate opens and ends when
/// the last worker has finished.
///
/// # Errors
///
/// Returns an error when `requests` or `tests` do not have exactly
/// `settings.thread_count` entries, when a request entry is `None`, when
/// `settings.request_count` is zero, when the warm-up request fails, or when a
/// worker cannot be set up or panics.
pub async fn run_many_test(
    settings: Settings,
    requests: Vec<Option<RequestSpec>>,
    tests: Vec<Option<ResponseTest>>,
) -> Result<Report, RunError> {
    let requests = validate(&settings, requests, &tests)?;
    if settings.thread_count == 0 {
        return Ok(Report::default());
    }

    let warm_target = if settings.warm {
        requests.first().cloned()
    } else {
        None
    };

    let (mut gate, tickets) = StartGate::with_parties(settings.thread_count);
    let handles: Vec<JoinHandle<Option<WorkerResult>>> = requests
        .into_iter()
        .zip(tests)
        .zip(tickets)
        .enumerate()
        .map(|(index, ((request, test), ticket))| {
            let worker = Worker {
                index,
                settings,
                request,
                test,
                ticket,
            };
            tokio::spawn(worker.run())
        })
        .collect();

    if let Err(err) = gate.wait_ready().await {
        gate.abort();
        drain(handles).await;
        return Err(err);
    }
    debug!("All {} workers ready", settings.thread_count);

    if let Some(target) = warm_target.as_ref()
        && let Err(err) = warm_up(&settings, target).await
    {
        gate.abort();
        drain(handles).await;
        return Err(err);
    }

    let start = gate.open();
    info!(
        "Released {} workers x {} requests",
        settings.thread_count, settings.request_count
    );

    let mut results = Vec::with_capacity(handles.len());
    let mut failure = None;
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(Some(result)) => results.push(result),
            Ok(None) => {
                failure.get_or_insert(RunError::WorkerAborted { worker: index });
            }
            Err(err) => {
                failure.get_or_insert(RunError::WorkerJoin { source: err });
            }
        }
    }
    let elapsed = start.elapsed();
    if let Some(err) = failure {
        return Err(err);
    }

    let report = aggregate(elapsed, results);
    info!(
        "Run finished in {}ms: {} completed, {} errors",
        elapsed.as_millis(),
        report.completed_count,
        report.error_count
    );
    Ok(report)
}

fn validate(
    settings: &Settings,
    requests: Vec<Option<RequestSpec>>,
    tests: &[Option<ResponseTest>],
) -> Result<Vec<RequestSpec>, RunError> {
    if requests.len() != settings.thread_count {
        return Err(RunError::RequestCountMismatch {
            expected: settings.thread_count,
            actual: requests.len(),
        });
    }
    if tests.len() != settings.thread_count {
        return Err(RunError::TestCountMismatch {
            expected: settings.thread_count,
            actual: tests.len(),
        });
    }
    if settings.thread_count > 0 && settings.request_count == 0 {
        return Err(RunError::ZeroRequestCount);
    }
    requests
        .into_iter()
        .enumerate()
        .map(|(worker, request)| request.ok_or(RunError::MissingRequest { worker }))
        .collect()
}

/// Joins workers released through an aborted gate.
async fn drain(handles: Vec<JoinHandle<Option<WorkerResult>>>) {
    for handle in handles {
        drop(handle.await);
    }
}
