use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("The number of requests ({actual}) must be equal to the thread count ({expected}).")]
    RequestCountMismatch { expected: usize, actual: usize },
    #[error("The number of response tests ({actual}) must be equal to the thread count ({expected}).")]
    TestCountMismatch { expected: usize, actual: usize },
    #[error("Request for worker {worker} is missing.")]
    MissingRequest { worker: usize },
    #[error("Request count per worker must be > 0.")]
    ZeroRequestCount,
    #[error("Warm-up request failed: {source}")]
    WarmupFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Worker {worker} failed to build its HTTP client: {source}")]
    WorkerSetup {
        worker: usize,
        #[source]
        source: reqwest::Error,
    },
    #[error("A worker exited before signaling readiness.")]
    WorkerVanished,
    #[error("Worker {worker} was released without producing a result.")]
    WorkerAborted { worker: usize },
    #[error("Worker task failed: {source}")]
    WorkerJoin {
        #[source]
        source: tokio::task::JoinError,
    },
}
