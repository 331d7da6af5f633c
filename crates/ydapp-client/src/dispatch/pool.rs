//! Bounded queue + worker pool between the callback route and user handlers.
//!
//! The route only enqueues; workers pull messages and run handlers. Each
//! handler runs in its own task so a panic costs one message, not a worker.
//! Workers stop once every queue sender is dropped.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use ydapp_core::protocol::message::ReceivedMessage;

use super::Dispatcher;

pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `workers` tasks draining a queue of `capacity` messages.
    pub fn spawn(
        dispatcher: Arc<Dispatcher>,
        capacity: usize,
        workers: usize,
    ) -> (mpsc::Sender<ReceivedMessage>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));

        let handles = (0..workers.max(1))
            .map(|id| tokio::spawn(worker_loop(id, Arc::clone(&rx), Arc::clone(&dispatcher))))
            .collect();

        (tx, Self { handles })
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for all workers to drain and exit.
    pub async fn join(self) {
        for h in self.handles {
            let _ = h.await;
        }
    }
}

async fn worker_loop(
    id: usize,
    rx: Arc<Mutex<mpsc::Receiver<ReceivedMessage>>>,
    dispatcher: Arc<Dispatcher>,
) {
    loop {
        let next = rx.lock().await.recv().await;
        let Some(msg) = next else { break };

        let package_id = msg.package_id.clone();
        let d = Arc::clone(&dispatcher);
        match tokio::spawn(async move { d.dispatch(msg).await }).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(worker = id, %package_id, error = %e, "handler failed");
            }
            Err(e) => {
                tracing::error!(worker = id, %package_id, error = %e, "handler panicked");
            }
        }
    }
    tracing::debug!(worker = id, "dispatch worker stopped");
}
