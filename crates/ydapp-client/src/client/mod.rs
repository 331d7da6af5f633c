//! Token-gated API client.
//!
//! `AppClient` owns the credential, the session and an `HttpTransport`. The
//! operations live in sibling modules (`token`, `compose`, `media`, `user`);
//! this module holds the shared request plumbing. Every call is a single
//! awaited round-trip: nothing is retried, nothing runs in parallel.

mod compose;
mod media;
mod token;
mod user;

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;

use ydapp_core::error::Result;
use ydapp_core::protocol::frame::{build_request, ResponseFrame};
use ydapp_core::AppCredential;

use crate::config::AppSection;
use crate::endpoints::QUERY_ACCESS_TOKEN;
use crate::session::Session;
use crate::transport::{HttpTransport, MultipartForm, ReqwestTransport};

#[derive(Clone)]
pub struct AppClient {
    credential: Arc<AppCredential>,
    server_addr: Arc<str>,
    transport: Arc<dyn HttpTransport>,
    session: Arc<Session>,
}

impl AppClient {
    pub fn new(
        credential: AppCredential,
        server_addr: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let server_addr: String = server_addr.into();
        Self {
            credential: Arc::new(credential),
            server_addr: server_addr.trim_end_matches('/').into(),
            transport,
            session: Arc::new(Session::new()),
        }
    }

    /// Client over the default reqwest transport.
    pub fn from_config(app: &AppSection) -> Result<Self> {
        let credential = app.credential()?;
        let transport = ReqwestTransport::new()?;
        Ok(Self::new(credential, app.server_addr.clone(), Arc::new(transport)))
    }

    pub fn credential(&self) -> &AppCredential {
        &self.credential
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, api: &str) -> String {
        format!("{}{}", self.server_addr, api)
    }

    /// Seal `inner`, POST it with the access token, parse the reply frame.
    async fn post_frame<T>(&self, api: &str, inner: &T) -> Result<ResponseFrame>
    where
        T: Serialize + Sync + ?Sized,
    {
        let body = build_request(&self.credential, inner)?;
        let reply = self.post_authed(api, body).await?;
        ResponseFrame::parse(&reply)
    }

    /// POST a prepared body with the access token; returns the 2xx body.
    async fn post_authed(&self, api: &str, body: Vec<u8>) -> Result<Bytes> {
        let token = self.session.access_token().await;
        tracing::debug!(api, bytes = body.len(), "post");
        self.transport
            .post_json(&self.url(api), &[(QUERY_ACCESS_TOKEN, token.as_str())], body)
            .await?
            .into_success_body()
    }

    async fn post_multipart_authed(&self, api: &str, form: MultipartForm) -> Result<Bytes> {
        let token = self.session.access_token().await;
        tracing::debug!(api, "post multipart");
        self.transport
            .post_multipart(&self.url(api), &[(QUERY_ACCESS_TOKEN, token.as_str())], form)
            .await?
            .into_success_body()
    }

    async fn get_authed(&self, api: &str, query: &[(&str, &str)]) -> Result<Bytes> {
        let token = self.session.access_token().await;
        let mut full: Vec<(&str, &str)> = Vec::with_capacity(query.len() + 1);
        full.push((QUERY_ACCESS_TOKEN, token.as_str()));
        full.extend_from_slice(query);
        tracing::debug!(api, "get");
        self.transport
            .get(&self.url(api), &full)
            .await?
            .into_success_body()
    }
}
