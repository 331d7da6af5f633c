//! ydapp core: wire contracts for the Youdu app API.
//!
//! This crate defines the secure envelope codec, the JSON frames that carry it,
//! and the message payload types shared by the client runtime and the callback
//! receiver. It intentionally carries no HTTP or runtime dependencies so it can
//! be reused by other transports and by test servers.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every malformed envelope or frame surfaces as `YdError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod credential;
pub mod error;
pub mod protocol;

pub use credential::AppCredential;
/// Shared result type.
pub use error::{ErrorKind, Result, YdError};
