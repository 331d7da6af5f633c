//! Dispatcher module exports.
//!
//! Re-exports the handler registry, the handler trait and the worker pool so
//! downstream consumers can depend on this module directly.

pub mod dispatcher;
pub mod pool;

pub use dispatcher::{handler_fn, Dispatcher, FnHandler, MessageHandler};
pub use pool::WorkerPool;
