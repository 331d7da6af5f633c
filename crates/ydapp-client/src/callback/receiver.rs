//! Webhook endpoint: open the callback envelope, ack with `packageId`, enqueue.
//!
//! Failures never leave this module as HTTP errors; the vendor only ever sees
//! `200`, with an empty body when the message could not be decoded.

use std::future::Future;
use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Router};
use tokio::net::TcpListener;

use ydapp_core::error::{Result, YdError};
use ydapp_core::protocol::frame::{decode_inner, CallbackFrame};
use ydapp_core::protocol::message::ReceivedMessage;
use ydapp_core::AppCredential;

use crate::app_state::AppState;
use crate::config::CallbackSection;
use crate::dispatch::{Dispatcher, WorkerPool};
use crate::router::build_router;

/// Decode a raw callback body into a message.
pub fn decode_callback(cred: &AppCredential, body: &[u8]) -> Result<ReceivedMessage> {
    let frame: CallbackFrame = serde_json::from_slice(body)
        .map_err(|e| YdError::Protocol(format!("callback frame: {e}")))?;
    let opened = cred.open(&frame.encrypt)?;
    decode_inner(&opened.payload)
}

pub async fn receive(State(state): State<AppState>, body: Bytes) -> (StatusCode, String) {
    let msg = match decode_callback(state.credential(), &body) {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(kind = e.kind().as_str(), error = %e, "callback rejected");
            return (StatusCode::OK, String::new());
        }
    };

    let package_id = msg.package_id.clone();
    tracing::debug!(%package_id, msg_type = %msg.msg_type, "callback received");
    state.enqueue(msg);
    (StatusCode::OK, package_id)
}

/// Running callback receiver: route state plus the worker pool behind it.
pub struct CallbackReceiver {
    state: AppState,
    pool: WorkerPool,
}

impl CallbackReceiver {
    /// Validate `cfg` and spawn the worker pool. Must be called inside a
    /// tokio runtime.
    pub fn start(
        credential: AppCredential,
        dispatcher: Dispatcher,
        cfg: &CallbackSection,
    ) -> Result<Self> {
        cfg.validate()?;
        let dispatcher = Arc::new(dispatcher);
        let (queue, pool) =
            WorkerPool::spawn(Arc::clone(&dispatcher), cfg.queue_capacity, cfg.workers);
        let state = AppState::new(credential, dispatcher, queue, cfg.path.clone())?;
        Ok(Self { state, pool })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Serve until `shutdown` resolves, then let the workers drain the queue.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Self { state, pool } = self;
        let app = build_router(state);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        pool.join().await;
        Ok(())
    }

    /// Stop accepting work and wait for queued messages to finish.
    pub async fn shutdown(self) {
        let Self { state, pool } = self;
        drop(state);
        pool.join().await;
    }
}
