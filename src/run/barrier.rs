use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use crate::error::RunError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Closed,
    Open,
    Aborted,
}

enum Readiness {
    Ready,
    Failed(RunError),
}

/// Orchestrator side of the two-phase start barrier.
///
/// Workers arrive through their [`GateTicket`]; the orchestrator waits for all
/// of them, then opens the gate with one broadcast. Dropping the gate without
/// opening it releases every waiting worker as aborted.
pub(crate) struct StartGate {
    parties: usize,
    ready_rx: mpsc::Receiver<Readiness>,
    gate_tx: watch::Sender<GateState>,
}

/// Worker side of the start barrier. Consumed on arrival.
pub(crate) struct GateTicket {
    ready_tx: mpsc::Sender<Readiness>,
    gate_rx: watch::Receiver<GateState>,
}

impl StartGate {
    pub(crate) fn with_parties(parties: usize) -> (Self, Vec<GateTicket>) {
        let (ready_tx, ready_rx) = mpsc::channel(parties.max(1));
        let (gate_tx, gate_rx) = watch::channel(GateState::Closed);
        let tickets = (0..parties)
            .map(|_| GateTicket {
                ready_tx: ready_tx.clone(),
                gate_rx: gate_rx.clone(),
            })
            .collect();
        (
            Self {
                parties,
                ready_rx,
                gate_tx,
            },
            tickets,
        )
    }

    /// Blocks until every party signaled ready.
    ///
    /// # Errors
    ///
    /// Returns the first setup failure reported by a worker, or
    /// [`RunError::WorkerVanished`] when a ticket was dropped without arriving.
    pub(crate) async fn wait_ready(&mut self) -> Result<(), RunError> {
        let mut arrived: usize = 0;
        while arrived < self.parties {
            match self.ready_rx.recv().await {
                Some(Readiness::Ready) => arrived = arrived.saturating_add(1),
                Some(Readiness::Failed(err)) => return Err(err),
                None => return Err(RunError::WorkerVanished),
            }
        }
        Ok(())
    }

    /// Takes the start timestamp and releases all workers.
    pub(crate) fn open(&self) -> Instant {
        let start = Instant::now();
        self.gate_tx.send_replace(GateState::Open);
        start
    }

    /// Releases all workers without letting them issue requests.
    pub(crate) fn abort(&self) {
        self.gate_tx.send_replace(GateState::Aborted);
    }
}

impl GateTicket {
    /// Signals ready and parks until the gate opens. Returns `false` when the
    /// run was aborted before release.
    pub(crate) async fn arrive(self) -> bool {
        let Self {
            ready_tx,
            mut gate_rx,
        } = self;
        if ready_tx.send(Readiness::Ready).await.is_err() {
            return false;
        }
        drop(ready_tx);

        let released = gate_rx
            .wait_for(|state| *state != GateState::Closed)
            .await
            .map(|state| *state);
        matches!(released, Ok(GateState::Open))
    }

    /// Reports a setup failure instead of arriving.
    pub(crate) async fn fail(self, error: RunError) {
        drop(self.ready_tx.send(Readiness::Failed(error)).await);
    }
}
