//! Top-level facade crate for ydapp.
//!
//! Re-exports the wire contracts and the client runtime so users can depend on a single crate.

pub mod core {
    pub use ydapp_core::*;
}

pub mod client {
    pub use ydapp_client::*;
}
