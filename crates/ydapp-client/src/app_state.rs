//! Shared state for the callback receiver.
//!
//! Holds the credential used to open inbound envelopes, the handler registry
//! and the sending half of the dispatch queue.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};

use ydapp_core::error::{Result, YdError};
use ydapp_core::protocol::message::ReceivedMessage;
use ydapp_core::AppCredential;

use crate::dispatch::Dispatcher;

/// What happened to a decoded callback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    Queued,
    NoHandler,
    QueueFull,
    Closed,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    credential: AppCredential,
    dispatcher: Arc<Dispatcher>,
    queue: mpsc::Sender<ReceivedMessage>,
    callback_path: String,
}

impl AppState {
    /// Fails with `Config` when the path cannot be mounted as a route.
    pub fn new(
        credential: AppCredential,
        dispatcher: Arc<Dispatcher>,
        queue: mpsc::Sender<ReceivedMessage>,
        callback_path: impl Into<String>,
    ) -> Result<Self> {
        let callback_path = callback_path.into();
        if !callback_path.starts_with('/') {
            return Err(YdError::Config(format!(
                "callback path must start with '/': {callback_path:?}"
            )));
        }
        Ok(Self {
            inner: Arc::new(AppStateInner {
                credential,
                dispatcher,
                queue,
                callback_path,
            }),
        })
    }

    pub fn credential(&self) -> &AppCredential {
        &self.inner.credential
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.inner.dispatcher)
    }

    pub fn callback_path(&self) -> &str {
        &self.inner.callback_path
    }

    /// Hand a message to the worker pool without waiting.
    pub fn enqueue(&self, msg: ReceivedMessage) -> Enqueued {
        if !self.inner.dispatcher.accepts(&msg.msg_type) {
            tracing::warn!(
                package_id = %msg.package_id,
                msg_type = %msg.msg_type,
                "no handler for message type, dropped"
            );
            return Enqueued::NoHandler;
        }

        match self.inner.queue.try_send(msg) {
            Ok(()) => Enqueued::Queued,
            Err(TrySendError::Full(msg)) => {
                tracing::warn!(package_id = %msg.package_id, "dispatch queue full, dropped");
                Enqueued::QueueFull
            }
            Err(TrySendError::Closed(msg)) => {
                tracing::warn!(package_id = %msg.package_id, "dispatch queue closed, dropped");
                Enqueued::Closed
            }
        }
    }
}
