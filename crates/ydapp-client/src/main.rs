//! ydapp-receiver
//!
//! Runs the callback receiver from a YAML config and logs every inbound
//! message. Config path comes from `YDAPP_CONFIG` (default `ydapp.yaml`).

use std::sync::Arc;

use async_trait::async_trait;
use tracing_subscriber::{fmt, EnvFilter};

use ydapp_client::{config, CallbackReceiver, Dispatcher, MessageHandler};
use ydapp_core::error::Result;
use ydapp_core::protocol::message::ReceivedMessage;

struct LogHandler;

#[async_trait]
impl MessageHandler for LogHandler {
    async fn handle(&self, msg: ReceivedMessage) -> Result<()> {
        tracing::info!(
            package_id = %msg.package_id,
            msg_type = %msg.msg_type,
            from_user = msg.from_user().unwrap_or(""),
            "message"
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("YDAPP_CONFIG").unwrap_or_else(|_| "ydapp.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let credential = cfg.app.credential()?;
    let listen = cfg.callback.listen_addr()?;

    let dispatcher = Dispatcher::new();
    dispatcher.set_fallback(Arc::new(LogHandler));

    let receiver = CallbackReceiver::start(credential, dispatcher, &cfg.callback)?;
    let listener = tokio::net::TcpListener::bind(listen).await?;

    tracing::info!(%listen, path = %cfg.callback.path, app_id = %cfg.app.app_id, "ydapp-receiver starting");
    receiver.serve(listener, shutdown_signal()).await?;
    tracing::info!("ydapp-receiver stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
