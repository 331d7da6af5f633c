use std::net::SocketAddr;

use serde::Deserialize;
use ydapp_core::error::{Result, YdError};
use ydapp_core::protocol::envelope::AppKey;
use ydapp_core::AppCredential;

use crate::endpoints::DEFAULT_CALLBACK_PATH;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    pub app: AppSection,

    #[serde(default)]
    pub callback: CallbackSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(YdError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.app.validate()?;
        self.callback.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    /// Tenant ("buin") number.
    pub buin: i32,
    pub app_id: String,
    /// Base64 of the 32-byte key from the admin console.
    pub aes_key: String,
    /// Scheme + host + port, e.g. `http://localhost:7080`.
    pub server_addr: String,
}

impl AppSection {
    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(YdError::Config("app.app_id must not be empty".into()));
        }
        AppKey::from_base64(&self.aes_key)?;
        if !(self.server_addr.starts_with("http://") || self.server_addr.starts_with("https://")) {
            return Err(YdError::Config(
                "app.server_addr must start with http:// or https://".into(),
            ));
        }
        Ok(())
    }

    pub fn credential(&self) -> Result<AppCredential> {
        AppCredential::from_base64_key(self.buin, self.app_id.clone(), &self.aes_key)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallbackSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for CallbackSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
            queue_capacity: default_queue_capacity(),
            workers: default_workers(),
        }
    }
}

impl CallbackSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.path.starts_with('/') {
            return Err(YdError::Config("callback.path must start with '/'".into()));
        }
        if !(1..=65536).contains(&self.queue_capacity) {
            return Err(YdError::Config(
                "callback.queue_capacity must be between 1 and 65536".into(),
            ));
        }
        if !(1..=64).contains(&self.workers) {
            return Err(YdError::Config(
                "callback.workers must be between 1 and 64".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| YdError::Config(format!("callback.listen must be a valid SocketAddr: {e}")))
    }
}

fn default_listen() -> String {
    "0.0.0.0:8899".into()
}
fn default_path() -> String {
    DEFAULT_CALLBACK_PATH.into()
}
fn default_queue_capacity() -> usize {
    1024
}
fn default_workers() -> usize {
    4
}
