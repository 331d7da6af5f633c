//! Message documents (outbound send + inbound callback).

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire discriminator carried in `msgType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MsgType {
    Text,
    Image,
    File,
    MpNews,
    ExLink,
}

impl MsgType {
    pub fn as_str(self) -> &'static str {
        match self {
            MsgType::Text => "text",
            MsgType::Image => "image",
            MsgType::File => "file",
            MsgType::MpNews => "mpnews",
            MsgType::ExLink => "exlink",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(MsgType::Text),
            "image" => Some(MsgType::Image),
            "file" => Some(MsgType::File),
            "mpnews" => Some(MsgType::MpNews),
            "exlink" => Some(MsgType::ExLink),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBody {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaBody {
    #[serde(alias = "mediaId")]
    pub media_id: String,
}

/// One article of a rich-article message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpNewsEntry {
    pub title: String,
    pub media_id: String,
    pub digest: String,
    pub content: String,
    pub url: String,
    #[serde(rename = "showFront")]
    pub show_front: i32,
    /// Local cover image, uploaded when `media_id` is empty.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

/// One external link card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExLinkEntry {
    pub title: String,
    pub url: String,
    pub digest: String,
    pub media_id: String,
    /// Local cover image, uploaded when `media_id` is empty.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

/// Outbound message body, one variant per `msgType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Text(TextBody),
    Image(MediaBody),
    File(MediaBody),
    MpNews(Vec<MpNewsEntry>),
    ExLink(Vec<ExLinkEntry>),
}

impl Message {
    pub fn text(content: impl Into<String>) -> Self {
        Message::Text(TextBody {
            content: content.into(),
        })
    }

    pub fn image(media_id: impl Into<String>) -> Self {
        Message::Image(MediaBody {
            media_id: media_id.into(),
        })
    }

    pub fn file(media_id: impl Into<String>) -> Self {
        Message::File(MediaBody {
            media_id: media_id.into(),
        })
    }

    pub fn msg_type(&self) -> MsgType {
        match self {
            Message::Text(_) => MsgType::Text,
            Message::Image(_) => MsgType::Image,
            Message::File(_) => MsgType::File,
            Message::MpNews(_) => MsgType::MpNews,
            Message::ExLink(_) => MsgType::ExLink,
        }
    }
}

/// Addressed message as sent to `/cgi/msg/send`.
///
/// Recipients are `|`-separated user or department ids.
#[derive(Debug, Clone, Copy)]
pub struct OutboundMessage<'a> {
    pub to_user: &'a str,
    pub to_dept: &'a str,
    pub message: &'a Message,
}

impl Serialize for OutboundMessage<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("toUser", self.to_user)?;
        map.serialize_entry("toDept", self.to_dept)?;
        map.serialize_entry("msgType", self.message.msg_type().as_str())?;
        match self.message {
            Message::Text(body) => map.serialize_entry("text", body)?,
            Message::Image(body) => map.serialize_entry("image", body)?,
            Message::File(body) => map.serialize_entry("file", body)?,
            Message::MpNews(list) => map.serialize_entry("MpNews", list)?,
            Message::ExLink(list) => map.serialize_entry("ExLink", list)?,
        }
        map.end()
    }
}

/// File attachment of an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedFile {
    #[serde(alias = "mediaId")]
    pub media_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
}

/// Decoded callback payload.
///
/// Only the routing fields are typed. The variant body stays in `extra`; the
/// accessors return `None` when a field is missing or shaped differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedMessage {
    pub package_id: String,
    #[serde(default)]
    pub msg_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReceivedMessage {
    pub fn kind(&self) -> Option<MsgType> {
        MsgType::parse(&self.msg_type)
    }

    pub fn from_user(&self) -> Option<&str> {
        self.extra.get("fromUser").and_then(Value::as_str)
    }

    pub fn create_time(&self) -> Option<i64> {
        self.extra.get("createTime").and_then(Value::as_i64)
    }

    /// `None` when absent or not shaped like a text body.
    pub fn text(&self) -> Option<TextBody> {
        self.body("text")
    }

    pub fn image(&self) -> Option<MediaBody> {
        self.body("image")
    }

    pub fn file(&self) -> Option<ReceivedFile> {
        self.body("file")
    }

    /// Typed view of any top-level field.
    pub fn body<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.extra.get(key).and_then(|v| T::deserialize(v).ok())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn outbound_keys_follow_wire_order() {
        let msg = Message::text("hi");
        let out = OutboundMessage {
            to_user: "u1|u2",
            to_dept: "",
            message: &msg,
        };
        let s = serde_json::to_string(&out).unwrap();
        assert_eq!(
            s,
            r#"{"toUser":"u1|u2","toDept":"","msgType":"text","text":{"content":"hi"}}"#
        );
    }

    #[test]
    fn mpnews_entries_skip_local_path() {
        let msg = Message::MpNews(vec![MpNewsEntry {
            title: "t".into(),
            media_id: "m".into(),
            show_front: 1,
            path: Some("/tmp/cover.jpg".into()),
            ..Default::default()
        }]);
        let out = OutboundMessage {
            to_user: "u",
            to_dept: "d",
            message: &msg,
        };
        let v: Value = serde_json::to_value(out).unwrap();
        assert_eq!(v["msgType"], "mpnews");
        let entry = &v["MpNews"][0];
        assert_eq!(entry["media_id"], "m");
        assert_eq!(entry["showFront"], 1);
        assert!(entry.get("path").is_none());
    }

    #[test]
    fn received_message_keeps_unknown_fields() {
        let raw = r#"{"packageId":"P","msgType":"voice","fromUser":"u","voice":{"media_id":"v"}}"#;
        let msg: ReceivedMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.package_id, "P");
        assert_eq!(msg.kind(), None);
        assert_eq!(msg.from_user(), Some("u"));
        assert_eq!(msg.extra["voice"]["media_id"], "v");
    }

    #[test]
    fn odd_body_shapes_still_decode() {
        let raw = r#"{"packageId":"P2","msgType":"text","text":{"body":"no content key"},"createTime":"soon"}"#;
        let msg: ReceivedMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.kind(), Some(MsgType::Text));
        assert_eq!(msg.text(), None);
        assert_eq!(msg.create_time(), None);

        let raw = r#"{"packageId":"P3","msgType":"image","image":{"mediaId":"m1"},"createTime":1700000000}"#;
        let msg: ReceivedMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.image().map(|b| b.media_id), Some("m1".to_string()));
        assert_eq!(msg.create_time(), Some(1_700_000_000));
        assert_eq!(msg.file(), None);
    }
}
