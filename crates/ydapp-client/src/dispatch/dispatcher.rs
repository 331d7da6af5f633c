use std::future::Future;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use dashmap::DashMap;

use ydapp_core::error::{Result, YdError};
use ydapp_core::protocol::message::ReceivedMessage;

/// User code invoked for each inbound message.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, msg: ReceivedMessage) -> Result<()>;
}

/// Adapter turning an async closure into a `MessageHandler`.
pub struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> MessageHandler for FnHandler<F>
where
    F: Fn(ReceivedMessage) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn handle(&self, msg: ReceivedMessage) -> Result<()> {
        (self.0)(msg).await
    }
}

pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn MessageHandler>
where
    F: Fn(ReceivedMessage) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Arc::new(FnHandler(f))
}

/// Registry of handlers keyed by `msgType`, with an optional catch-all.
#[derive(Default)]
pub struct Dispatcher {
    by_type: DashMap<String, Arc<dyn MessageHandler>>,
    fallback: OnceLock<Arc<dyn MessageHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            by_type: DashMap::new(),
            fallback: OnceLock::new(),
        }
    }

    pub fn register(&self, msg_type: impl Into<String>, handler: Arc<dyn MessageHandler>) {
        self.by_type.insert(msg_type.into(), handler);
    }

    /// Handler for message types nothing else claimed. Only the first call
    /// installs a handler; later calls return `false`.
    pub fn set_fallback(&self, handler: Arc<dyn MessageHandler>) -> bool {
        let installed = self.fallback.set(handler).is_ok();
        if !installed {
            tracing::warn!("fallback handler already set, ignoring");
        }
        installed
    }

    pub fn registered_types(&self) -> Vec<String> {
        self.by_type.iter().map(|e| e.key().clone()).collect()
    }

    pub fn handler_for(&self, msg_type: &str) -> Option<Arc<dyn MessageHandler>> {
        self.by_type
            .get(msg_type)
            .map(|e| e.value().clone())
            .or_else(|| self.fallback.get().cloned())
    }

    pub fn accepts(&self, msg_type: &str) -> bool {
        self.by_type.contains_key(msg_type) || self.fallback.get().is_some()
    }

    pub async fn dispatch(&self, msg: ReceivedMessage) -> Result<()> {
        let handler = self.handler_for(&msg.msg_type).ok_or_else(|| {
            YdError::Protocol(format!("no handler for msgType: {}", msg.msg_type))
        })?;
        handler.handle(msg).await
    }
}
