use std::io;
use std::path::{Path, PathBuf};

use ydapp_core::error::{Result, YdError};
use ydapp_core::protocol::message::{ExLinkEntry, Message, MpNewsEntry, OutboundMessage};
use ydapp_core::protocol::payload::MediaType;

use super::AppClient;
use crate::endpoints::SEND_MSG;

const MPNEWS_COVER_NAME: &str = "MpNews.jpg";
const EXLINK_COVER_NAME: &str = "ExLink.jpg";

impl AppClient {
    /// Fill every empty `media_id` of an article/link list by uploading the
    /// entry's cover image, in order. The first failure aborts the batch.
    pub async fn compose(&self, message: Message) -> Result<Message> {
        match message {
            Message::MpNews(mut entries) => {
                for (idx, entry) in entries.iter_mut().enumerate() {
                    if entry.media_id.is_empty() {
                        let path = cover_path(idx, entry.path.as_deref())?;
                        entry.media_id = self
                            .upload_path(MediaType::Image, MPNEWS_COVER_NAME, path)
                            .await?;
                    }
                }
                Ok(Message::MpNews(entries))
            }
            Message::ExLink(mut entries) => {
                for (idx, entry) in entries.iter_mut().enumerate() {
                    if entry.media_id.is_empty() {
                        let path = cover_path(idx, entry.path.as_deref())?;
                        entry.media_id = self
                            .upload_path(MediaType::Image, EXLINK_COVER_NAME, path)
                            .await?;
                    }
                }
                Ok(Message::ExLink(entries))
            }
            other => Ok(other),
        }
    }

    /// Compose and send any message variant to `/cgi/msg/send`.
    ///
    /// `to_user` / `to_dept` take several ids separated by `|`.
    pub async fn send(&self, to_user: &str, to_dept: &str, message: Message) -> Result<()> {
        let message = self.compose(message).await?;
        let out = OutboundMessage {
            to_user,
            to_dept,
            message: &message,
        };
        let frame = self.post_frame(SEND_MSG, &out).await?;
        frame.check()?;
        tracing::debug!(msg_type = message.msg_type().as_str(), "message sent");
        Ok(())
    }

    pub async fn send_text(&self, to_user: &str, to_dept: &str, content: &str) -> Result<()> {
        self.send(to_user, to_dept, Message::text(content)).await
    }

    pub async fn send_image(&self, to_user: &str, to_dept: &str, media_id: &str) -> Result<()> {
        self.send(to_user, to_dept, Message::image(media_id)).await
    }

    pub async fn send_file(&self, to_user: &str, to_dept: &str, media_id: &str) -> Result<()> {
        self.send(to_user, to_dept, Message::file(media_id)).await
    }

    pub async fn send_mpnews(
        &self,
        to_user: &str,
        to_dept: &str,
        entries: Vec<MpNewsEntry>,
    ) -> Result<()> {
        self.send(to_user, to_dept, Message::MpNews(entries)).await
    }

    pub async fn send_exlink(
        &self,
        to_user: &str,
        to_dept: &str,
        entries: Vec<ExLinkEntry>,
    ) -> Result<()> {
        self.send(to_user, to_dept, Message::ExLink(entries)).await
    }

    /// Upload a local image (named after the file) and send it.
    pub async fn send_image_path(
        &self,
        to_user: &str,
        to_dept: &str,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let media_id = self.upload_path(MediaType::Image, &name, path).await?;
        self.send_image(to_user, to_dept, &media_id).await
    }

    /// Upload a local file under `name` and send it.
    pub async fn send_file_path(
        &self,
        to_user: &str,
        to_dept: &str,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let media_id = self.upload_path(MediaType::File, name, path).await?;
        self.send_file(to_user, to_dept, &media_id).await
    }
}

fn cover_path(idx: usize, path: Option<&Path>) -> Result<PathBuf> {
    path.map(Path::to_path_buf).ok_or_else(|| {
        YdError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("entry {idx} has neither media_id nor path"),
        ))
    })
}
