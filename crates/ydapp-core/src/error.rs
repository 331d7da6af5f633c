//! Shared error type across ydapp crates.

use thiserror::Error;

/// Stable error codes (one per failure class).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad configuration (key length, base64, missing fields).
    Config,
    /// Connection-level failure before a status line arrived.
    Transport,
    /// Server answered with a non-2xx status.
    HttpStatus,
    /// Envelope could not be decoded or failed the app id check.
    Envelope,
    /// Frame JSON malformed, field missing or mistyped.
    Protocol,
    /// Frame parsed but `errcode != 0`.
    Api,
    /// Local file read/write failure.
    Io,
}

impl ErrorKind {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::Transport => "TRANSPORT",
            ErrorKind::HttpStatus => "HTTP_STATUS",
            ErrorKind::Envelope => "ENVELOPE",
            ErrorKind::Protocol => "PROTOCOL",
            ErrorKind::Api => "API",
            ErrorKind::Io => "IO",
        }
    }
}

/// Reasons an envelope is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("malformed base64: {0}")]
    Base64(String),
    #[error("ciphertext length {0} is not a positive multiple of the block size")]
    BlockLength(usize),
    #[error("invalid padding")]
    Padding,
    #[error("plaintext too short ({0} bytes)")]
    Truncated(usize),
    #[error("declared length {declared} exceeds remaining {remaining} bytes")]
    LengthOverflow { declared: u32, remaining: usize },
    #[error("app id is not utf-8")]
    AppIdEncoding,
    #[error("app id mismatch (expected {expected}, got {actual})")]
    AppIdMismatch { expected: String, actual: String },
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, YdError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum YdError {
    #[error("config: {0}")]
    Config(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("http status {status}")]
    HttpStatus { status: u16 },
    #[error("envelope: {0}")]
    Envelope(#[from] EnvelopeError),
    #[error("protocol: {0}")]
    Protocol(String),
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("field {field} is not a {expected}")]
    TypeMismatch { field: String, expected: &'static str },
    #[error("errcode: {code}, errmsg: {msg}")]
    Api { code: i32, msg: String },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl YdError {
    /// Map an error to its stable code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            YdError::Config(_) => ErrorKind::Config,
            YdError::Transport(_) => ErrorKind::Transport,
            YdError::HttpStatus { .. } => ErrorKind::HttpStatus,
            YdError::Envelope(_) => ErrorKind::Envelope,
            YdError::Protocol(_) | YdError::MissingField(_) | YdError::TypeMismatch { .. } => {
                ErrorKind::Protocol
            }
            YdError::Api { .. } => ErrorKind::Api,
            YdError::Io(_) => ErrorKind::Io,
        }
    }
}
