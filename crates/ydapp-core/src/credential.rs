//! Tenant credential: buin + app id + key, with app-id-checked envelope helpers.

use crate::error::{EnvelopeError, Result};
use crate::protocol::envelope::{self, AppKey, OpenedEnvelope, NONCE_LEN};

/// Immutable identity of one application inside one tenant.
#[derive(Debug, Clone)]
pub struct AppCredential {
    buin: i32,
    app_id: String,
    key: AppKey,
}

impl AppCredential {
    pub fn new(buin: i32, app_id: impl Into<String>, key: AppKey) -> Self {
        Self {
            buin,
            app_id: app_id.into(),
            key,
        }
    }

    /// Build from the base64 key string; fails with a config error on a bad key.
    pub fn from_base64_key(buin: i32, app_id: impl Into<String>, aes_key: &str) -> Result<Self> {
        Ok(Self::new(buin, app_id, AppKey::from_base64(aes_key)?))
    }

    pub fn buin(&self) -> i32 {
        self.buin
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn key(&self) -> &AppKey {
        &self.key
    }

    pub fn seal(&self, payload: &[u8]) -> Result<String> {
        envelope::seal(payload, &self.key, &self.app_id)
    }

    pub fn seal_with_nonce(&self, nonce: [u8; NONCE_LEN], payload: &[u8]) -> Result<String> {
        envelope::seal_with_nonce(nonce, payload, &self.key, &self.app_id)
    }

    /// Open an envelope and reject it unless it was sealed for this app.
    ///
    /// The app id comparison is the only authenticity check the format offers.
    pub fn open(&self, ciphertext: &str) -> Result<OpenedEnvelope> {
        let opened = envelope::open(ciphertext, &self.key)?;
        if opened.app_id != self.app_id {
            tracing::debug!(expected = %self.app_id, actual = %opened.app_id, "envelope app id mismatch");
            return Err(EnvelopeError::AppIdMismatch {
                expected: self.app_id.clone(),
                actual: opened.app_id,
            }
            .into());
        }
        Ok(opened)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::YdError;

    #[test]
    fn open_rejects_foreign_app_id() {
        let key = AppKey::from_bytes([0u8; 32]);
        let sender = AppCredential::new(1, "A1", key.clone());
        let receiver = AppCredential::new(1, "A2", key);

        let sealed = sender.seal(b"hello").unwrap();
        let err = receiver.open(&sealed).unwrap_err();
        assert!(matches!(
            err,
            YdError::Envelope(EnvelopeError::AppIdMismatch { .. })
        ));
        assert_eq!(sender.open(&sealed).unwrap().payload.as_ref(), b"hello");
    }
}
