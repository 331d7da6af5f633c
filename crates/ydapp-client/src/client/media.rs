use std::path::Path;

use bytes::Bytes;

use ydapp_core::error::{EnvelopeError, Result, YdError};
use ydapp_core::protocol::frame::{build_request, encode_inner, ResponseFrame};
use ydapp_core::protocol::payload::{MediaInfo, MediaRef, MediaType, UploadMeta};

use super::AppClient;
use crate::endpoints::{DOWNLOAD_MEDIA, SEARCH_MEDIA, UPLOAD_MEDIA};
use crate::transport::MultipartForm;

impl AppClient {
    /// Upload `data` and return the server-assigned media id.
    ///
    /// The metadata and the file content are sealed independently; the file
    /// part carries the ciphertext string as its raw bytes.
    pub async fn upload(&self, media_type: MediaType, name: &str, data: &[u8]) -> Result<String> {
        let meta = encode_inner(&UploadMeta {
            media_type,
            name: name.to_string(),
        })?;
        let form = MultipartForm::new()
            .text("buin", self.credential.buin().to_string())
            .text("appId", self.credential.app_id())
            .text("encrypt", self.credential.seal(&meta)?)
            .file("file", name, self.credential.seal(data)?.into_bytes());

        let reply = self.post_multipart_authed(UPLOAD_MEDIA, form).await?;
        let frame = ResponseFrame::parse(&reply)?;
        frame.check()?;

        let media: MediaRef = frame.decode_encrypted(&self.credential)?;
        tracing::debug!(
            media_type = media_type.as_str(),
            file_name = name,
            bytes = data.len(),
            media_id = %media.media_id,
            "uploaded"
        );
        Ok(media.media_id)
    }

    /// Read a local file and upload it.
    pub async fn upload_path(
        &self,
        media_type: MediaType,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<String> {
        let data = tokio::fs::read(path.as_ref()).await?;
        self.upload(media_type, name, &data).await
    }

    /// Fetch media content. The reply body is a bare envelope, not a frame.
    pub async fn download(&self, media_id: &str) -> Result<Bytes> {
        let body = build_request(
            &self.credential,
            &MediaRef {
                media_id: media_id.to_string(),
            },
        )?;
        let reply = self.post_authed(DOWNLOAD_MEDIA, body).await?;

        // Errors still come back as a JSON frame.
        if reply.first() == Some(&b'{') {
            if let Ok(frame) = ResponseFrame::parse(&reply) {
                frame.check()?;
                return Err(YdError::Protocol(
                    "download returned a frame, not media".into(),
                ));
            }
        }

        let text = std::str::from_utf8(&reply)
            .map_err(|_| EnvelopeError::Base64("download body is not text".into()))?;
        Ok(self.credential.open(text)?.payload)
    }

    /// Download and write to `path`, creating missing parent directories.
    pub async fn download_to(&self, media_id: &str, path: impl AsRef<Path>) -> Result<()> {
        let data = self.download(media_id).await?;
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(path, &data).await?;
        Ok(())
    }

    /// Name and size of stored media.
    pub async fn search_file(&self, media_id: &str) -> Result<MediaInfo> {
        let frame = self
            .post_frame(
                SEARCH_MEDIA,
                &MediaRef {
                    media_id: media_id.to_string(),
                },
            )
            .await?;
        frame.check()?;
        frame.decode_encrypted(&self.credential)
    }
}
