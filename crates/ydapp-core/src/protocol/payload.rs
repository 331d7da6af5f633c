//! Small documents exchanged inside envelopes by the token and media endpoints.

use serde::{Deserialize, Serialize};

/// Result of the timestamp exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub expire_in: i64,
}

/// Media kinds accepted by the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    File,
    Image,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::File => "file",
            MediaType::Image => "image",
        }
    }
}

/// Sealed into the `encrypt` form field of an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadMeta {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub name: String,
}

/// `{mediaId}` request and upload response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub media_id: String,
}

/// Metadata returned by `/cgi/media/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub name: String,
    pub size: i64,
}
