//! Outbound HTTP capability.
//!
//! The API client only needs three call shapes, so they are expressed as a
//! trait: production uses `ReqwestTransport`, tests plug in an in-process fake
//! server. Non-2xx replies are returned as data; the client decides.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;

use ydapp_core::error::{Result, YdError};

/// Status + raw body of a completed round-trip.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: Bytes,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body of a 2xx reply, `HttpStatus` otherwise.
    pub fn into_success_body(self) -> Result<Bytes> {
        if !self.is_success() {
            return Err(YdError::HttpStatus {
                status: self.status,
            });
        }
        Ok(self.body)
    }
}

/// File part of a multipart body. `bytes` are written verbatim.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Transport-neutral multipart form.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub file: Option<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.file = Some(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            bytes,
        });
        self
    }

    /// First text field named `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST a JSON body.
    async fn post_json(&self, url: &str, query: &[(&str, &str)], body: Vec<u8>)
        -> Result<HttpReply>;

    /// POST a multipart form.
    async fn post_multipart(
        &self,
        url: &str,
        query: &[(&str, &str)],
        form: MultipartForm,
    ) -> Result<HttpReply>;

    /// GET with query string.
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpReply>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ydapp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport_err)?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<HttpReply> {
        let resp = self
            .client
            .post(url)
            .query(query)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport_err)?;
        read_reply(resp).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        query: &[(&str, &str)],
        form: MultipartForm,
    ) -> Result<HttpReply> {
        let mut multipart = reqwest::multipart::Form::new();
        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }
        if let Some(file) = form.file {
            let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
            multipart = multipart.part(file.field, part);
        }

        let resp = self
            .client
            .post(url)
            .query(query)
            .multipart(multipart)
            .send()
            .await
            .map_err(transport_err)?;
        read_reply(resp).await
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpReply> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(transport_err)?;
        read_reply(resp).await
    }
}

async fn read_reply(resp: reqwest::Response) -> Result<HttpReply> {
    let status = resp.status().as_u16();
    let body = resp.bytes().await.map_err(transport_err)?;
    Ok(HttpReply { status, body })
}

fn transport_err(e: reqwest::Error) -> YdError {
    YdError::Transport(e.to_string())
}
