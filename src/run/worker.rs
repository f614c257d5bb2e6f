use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::error::RunError;
use crate::http::{
    Exchange, Probe, RequestSpec, build_client, collect_exchange, drain_response_body,
};

use super::barrier::GateTicket;
use super::result::WorkerResult;
use super::settings::Settings;

/// Per-worker response hook, called once after every request with the
/// outcome and its latency. Purely observational.
pub type ResponseTest = Arc<dyn Fn(Probe<'_>, Duration) + Send + Sync>;

pub(super) struct Worker {
    pub(super) index: usize,
    pub(super) settings: Settings,
    pub(super) request: RequestSpec,
    pub(super) test: Option<ResponseTest>,
    pub(super) ticket: GateTicket,
}

impl Worker {
    /// Runs the worker to completion. Returns `None` when the start gate was
    /// aborted or setup failed; no request is issued in either case.
    pub(super) async fn run(self) -> Option<WorkerResult> {
        let Self {
            index,
            settings,
            request,
            test,
            ticket,
        } = self;

        let client = match build_client(settings.timeout) {
            Ok(client) => client,
            Err(err) => {
                ticket
                    .fail(RunError::WorkerSetup {
                        worker: index,
                        source: err,
                    })
                    .await;
                return None;
            }
        };
        let mut result = WorkerResult::with_capacity(settings.request_count);

        if !ticket.arrive().await {
            debug!("Worker {} released without running", index);
            return None;
        }

        for slot in 0..settings.request_count {
            let outgoing = request.to_request();
            let started = Instant::now();
            let response = client.execute(outgoing).await;
            let latency = started.elapsed();

            match response {
                Ok(response) => {
                    result.record_status(latency, response.status().as_u16());
                    match test.as_ref() {
                        Some(test) => {
                            let exchange: Exchange = collect_exchange(response).await;
                            test(Probe::Response(&exchange), latency);
                        }
                        None => {
                            if let Err(err) = drain_response_body(response).await {
                                debug!("Worker {} failed to drain body: {}", index, err);
                            }
                        }
                    }
                }
                Err(err) => {
                    debug!("Worker {} request {} failed: {}", index, slot, err);
                    result.record_error(latency);
                    if let Some(test) = test.as_ref() {
                        test(Probe::Failure(&err), latency);
                    }
                }
            }

            let has_next = slot.saturating_add(1) < settings.request_count;
            if has_next {
                pace(settings.wait_between_requests, Instant::now()).await;
            }
        }

        debug!("Worker {} finished {} requests", index, settings.request_count);
        Some(result)
    }
}

/// Sleeps until `wait` has passed since `reference`.
async fn pace(wait: Duration, reference: Instant) {
    let remaining = wait.saturating_sub(reference.elapsed());
    if !remaining.is_zero() {
        sleep(remaining).await;
    }
}
