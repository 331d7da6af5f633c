//! Envelope codec (panic-free).
//!
//! Plaintext layout before padding:
//!
//! ```text
//! | nonce (16) | len (u32 BE) | payload (len) | app id (rest) |
//! ```
//!
//! The buffer is PKCS#7 padded, encrypted with AES-256-CBC (IV = first 16 key
//! bytes) and base64 encoded. Parsing rules:
//! - Never index (`buf[0]`); always use `Buf` and `remaining()` checks.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.

use std::fmt;

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use rand::RngCore;

use crate::error::{EnvelopeError, Result, YdError};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Symmetric key length (AES-256).
pub const KEY_LEN: usize = 32;
/// Random prefix length.
pub const NONCE_LEN: usize = 16;

const BLOCK_LEN: usize = 16;
const HEADER_LEN: usize = NONCE_LEN + 4;

/// Tenant key shared with the server.
#[derive(Clone, PartialEq, Eq)]
pub struct AppKey([u8; KEY_LEN]);

impl AppKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode the base64 key string handed out by the admin console.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let raw = STANDARD
            .decode(encoded.trim())
            .map_err(|e| YdError::Config(format!("aes key base64 decode failed: {e}")))?;
        let bytes: [u8; KEY_LEN] = raw.as_slice().try_into().map_err(|_| {
            YdError::Config(format!(
                "aes key must decode to {KEY_LEN} bytes, got {}",
                raw.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    fn iv(&self) -> [u8; BLOCK_LEN] {
        let mut iv = [0u8; BLOCK_LEN];
        iv.copy_from_slice(&self.0[..BLOCK_LEN]);
        iv
    }
}

impl fmt::Debug for AppKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppKey(..)")
    }
}

/// Decoded envelope contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedEnvelope {
    /// Business payload (usually JSON, raw bytes for media).
    pub payload: Bytes,
    /// Length prefix as read from the wire.
    pub declared_len: u32,
    /// Trailing app id. Not checked here; see `AppCredential::open`.
    pub app_id: String,
}

/// Seal `payload` with a fresh random nonce.
pub fn seal(payload: &[u8], key: &AppKey, app_id: &str) -> Result<String> {
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    seal_with_nonce(nonce, payload, key, app_id)
}

/// Seal with a caller-chosen nonce (reproducible output).
pub fn seal_with_nonce(
    nonce: [u8; NONCE_LEN],
    payload: &[u8],
    key: &AppKey,
    app_id: &str,
) -> Result<String> {
    let len = u32::try_from(payload.len())
        .map_err(|_| YdError::Protocol(format!("payload too large: {} bytes", payload.len())))?;

    let mut buf = BytesMut::with_capacity(HEADER_LEN + payload.len() + app_id.len());
    buf.put_slice(&nonce);
    buf.put_u32(len);
    buf.put_slice(payload);
    buf.put_slice(app_id.as_bytes());

    let cipher = Aes256CbcEnc::new(&key.0.into(), &key.iv().into());
    let sealed = cipher.encrypt_padded_vec_mut::<Pkcs7>(&buf);
    Ok(STANDARD.encode(sealed))
}

/// Decode an envelope string. The app id is returned, not verified.
pub fn open(ciphertext: &str, key: &AppKey) -> Result<OpenedEnvelope> {
    let raw = STANDARD
        .decode(ciphertext.trim())
        .map_err(|e| EnvelopeError::Base64(e.to_string()))?;
    if raw.is_empty() || raw.len() % BLOCK_LEN != 0 {
        return Err(EnvelopeError::BlockLength(raw.len()).into());
    }

    let cipher = Aes256CbcDec::new(&key.0.into(), &key.iv().into());
    let plain = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&raw)
        .map_err(|_| EnvelopeError::Padding)?;

    let mut buf = Bytes::from(plain);
    if buf.remaining() < HEADER_LEN {
        return Err(EnvelopeError::Truncated(buf.remaining()).into());
    }
    buf.advance(NONCE_LEN);

    let declared_len = buf.get_u32();
    let remaining = buf.remaining();
    if declared_len as usize > remaining {
        return Err(EnvelopeError::LengthOverflow {
            declared: declared_len,
            remaining,
        }
        .into());
    }

    let payload = buf.split_to(declared_len as usize);
    let app_id = std::str::from_utf8(&buf)
        .map_err(|_| EnvelopeError::AppIdEncoding)?
        .to_string();

    Ok(OpenedEnvelope {
        payload,
        declared_len,
        app_id,
    })
}
