//! Runtime for executing booking conversations
//!
//! Each identity gets its own worker task draining a channel, so events for
//! one user run strictly in order while different users proceed in parallel.

mod error;
mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use error::{GatewayError, NotifyError, RuntimeError};
pub use executor::ConversationRuntime;
pub use traits::*;

use crate::state_machine::{Event, Identity};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;

/// Pending events per identity before senders wait
const WORKER_QUEUE_SIZE: usize = 32;

/// Handle to a running session worker
struct SessionWorker {
    event_tx: mpsc::Sender<Event>,
    task: JoinHandle<()>,
}

/// Manager routing events to one sequential worker per identity
pub struct RuntimeManager<S, G, N, C>
where
    S: SessionStore + 'static,
    G: MessageGateway + 'static,
    N: OperatorNotifier + 'static,
    C: Clock + 'static,
{
    runtime: Arc<ConversationRuntime<S, G, N, C>>,
    workers: RwLock<HashMap<Identity, SessionWorker>>,
}

impl<S, G, N, C> RuntimeManager<S, G, N, C>
where
    S: SessionStore + 'static,
    G: MessageGateway + 'static,
    N: OperatorNotifier + 'static,
    C: Clock + 'static,
{
    pub fn new(runtime: ConversationRuntime<S, G, N, C>) -> Self {
        Self {
            runtime: Arc::new(runtime),
            workers: RwLock::new(HashMap::new()),
        }
    }

    /// Queue an event for an identity, starting its worker if needed
    pub async fn send_event(&self, identity: Identity, event: Event) -> Result<(), RuntimeError> {
        let event_tx = self.get_or_spawn(identity).await;
        event_tx
            .send(event)
            .await
            .map_err(|_| RuntimeError::WorkerStopped(identity))
    }

    async fn get_or_spawn(&self, identity: Identity) -> mpsc::Sender<Event> {
        // Check if already running
        {
            let workers = self.workers.read().await;
            if let Some(worker) = workers.get(&identity) {
                return worker.event_tx.clone();
            }
        }

        let mut workers = self.workers.write().await;
        // Another caller may have spawned it while we waited for the lock
        if let Some(worker) = workers.get(&identity) {
            return worker.event_tx.clone();
        }

        let (event_tx, mut event_rx) = mpsc::channel(WORKER_QUEUE_SIZE);
        let runtime = self.runtime.clone();
        let task = tokio::spawn(async move {
            tracing::debug!(identity = %identity, "Session worker started");
            while let Some(event) = event_rx.recv().await {
                runtime.process_event(identity, event).await;
            }
            tracing::debug!(identity = %identity, "Session worker stopped");
        });

        workers.insert(
            identity,
            SessionWorker {
                event_tx: event_tx.clone(),
                task,
            },
        );
        event_tx
    }

    /// Stop accepting events and wait for queued ones to finish
    pub async fn shutdown(&self) {
        let workers: Vec<SessionWorker> = self.workers.write().await.drain().map(|(_, w)| w).collect();
        tracing::info!(workers = workers.len(), "Draining session workers");

        for SessionWorker { event_tx, task } in workers {
            drop(event_tx);
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Session worker panicked");
            }
        }
    }
}
