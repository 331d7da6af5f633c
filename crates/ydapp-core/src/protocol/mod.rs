//! Protocol modules (envelope + frames + payloads).
//!
//! - Envelope: AES-256-CBC sealed `nonce | len | payload | appId` buffer, base64 on the wire.
//! - Frame: outer JSON skeleton (`buin`, `appId`, `encrypt` / `errcode`, `errmsg`).
//! - Message / payload / user: the JSON documents that travel inside envelopes.
//!
//! All decoders are panic-free: malformed input is reported as `YdError`
//! instead of panicking or indexing raw buffers.

pub mod envelope;
pub mod frame;
pub mod message;
pub mod payload;
pub mod user;
