//! Transport layer (outbound HTTP).
//!
//! Exposes the `HttpTransport` seam and its reqwest implementation.

pub mod http;

pub use http::{FilePart, HttpReply, HttpTransport, MultipartForm, ReqwestTransport};
