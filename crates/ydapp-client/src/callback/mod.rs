//! Inbound webhook receiver.

pub mod receiver;

pub use receiver::{decode_callback, receive, CallbackReceiver};
