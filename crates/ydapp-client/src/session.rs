//! Session: the current access token.
//!
//! The token is replaced wholesale on every exchange and read by cloning, so a
//! concurrent refresh is observed either entirely or not at all.

use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    /// Lifetime in seconds as granted by the server.
    pub expire_in: i64,
    pub obtained_at: Instant,
}

impl Token {
    pub fn new(access_token: String, expire_in: i64) -> Self {
        Self {
            access_token,
            expire_in,
            obtained_at: Instant::now(),
        }
    }

    pub fn expires_at(&self) -> Instant {
        self.obtained_at + Duration::from_secs(self.expire_in.max(0) as u64)
    }

    /// Informational only; the client never refreshes on its own.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at()
    }
}

#[derive(Debug, Default)]
pub struct Session {
    current: RwLock<Option<Token>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn token(&self) -> Option<Token> {
        self.current.read().await.clone()
    }

    /// Token string for the query parameter; empty before the first exchange.
    pub async fn access_token(&self) -> String {
        self.current
            .read()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
            .unwrap_or_default()
    }

    pub async fn replace(&self, token: Token) {
        *self.current.write().await = Some(token);
    }

    pub async fn clear(&self) {
        *self.current.write().await = None;
    }
}
