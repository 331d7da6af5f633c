//! ydapp client library entry.
//!
//! Wires config, the outbound HTTP transport, the token session and the API
//! client on one side, and the callback receiver with its dispatcher and
//! worker pool on the other. Consumed by the receiver binary (`main.rs`) and
//! by integration tests.

pub mod app_state;
pub mod callback;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod endpoints;
pub mod router;
pub mod session;
pub mod transport;

pub use callback::CallbackReceiver;
pub use client::AppClient;
pub use dispatch::{handler_fn, Dispatcher, MessageHandler};
pub use session::{Session, Token};
pub use transport::{HttpTransport, ReqwestTransport};
