//! Outer JSON frames.
//!
//! Requests always look like `{"buin": .., "appId": .., "encrypt": ..}`. Responses
//! carry `errcode`/`errmsg` plus opaque fields; the business payload, when any,
//! sits sealed in `encrypt`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::credential::AppCredential;
use crate::error::{Result, YdError};
use crate::protocol::envelope::{OpenedEnvelope, NONCE_LEN};

/// `errcode` value meaning success.
pub const STATUS_OK: i32 = 0;

/// Outbound frame. Field order is the wire order.
#[derive(Debug, Serialize)]
pub struct RequestFrame<'a> {
    pub buin: i32,
    #[serde(rename = "appId")]
    pub app_id: &'a str,
    pub encrypt: String,
}

impl<'a> RequestFrame<'a> {
    pub fn new(cred: &'a AppCredential, encrypt: String) -> Self {
        Self {
            buin: cred.buin(),
            app_id: cred.app_id(),
            encrypt,
        }
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| YdError::Protocol(format!("encode frame: {e}")))
    }
}

/// Inbound webhook body.
#[derive(Debug, Deserialize)]
pub struct CallbackFrame {
    pub encrypt: String,
}

/// Serialize an inner document to JSON, keeping field order.
pub fn encode_inner<T: Serialize + ?Sized>(inner: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(inner).map_err(|e| YdError::Protocol(format!("encode payload: {e}")))
}

/// Decode an opened payload into a typed document.
pub fn decode_inner<T: DeserializeOwned>(payload: &[u8]) -> Result<T> {
    serde_json::from_slice(payload).map_err(|e| YdError::Protocol(format!("decode payload: {e}")))
}

/// Seal `inner` and wrap it in a request frame.
pub fn build_request<T: Serialize + ?Sized>(cred: &AppCredential, inner: &T) -> Result<Vec<u8>> {
    let encrypt = cred.seal(&encode_inner(inner)?)?;
    RequestFrame::new(cred, encrypt).to_vec()
}

/// Same as [`build_request`] with a fixed nonce, for byte-exact output.
pub fn build_request_with_nonce<T: Serialize + ?Sized>(
    cred: &AppCredential,
    nonce: [u8; NONCE_LEN],
    inner: &T,
) -> Result<Vec<u8>> {
    let encrypt = cred.seal_with_nonce(nonce, &encode_inner(inner)?)?;
    RequestFrame::new(cred, encrypt).to_vec()
}

/// Parsed response frame.
#[derive(Debug, Clone)]
pub struct ResponseFrame {
    errcode: i32,
    errmsg: String,
    fields: Map<String, Value>,
}

impl ResponseFrame {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| YdError::Protocol(format!("invalid response json: {e}")))?;
        let Value::Object(fields) = value else {
            return Err(YdError::Protocol("response is not a json object".into()));
        };

        let mut frame = Self {
            errcode: STATUS_OK,
            errmsg: String::new(),
            fields,
        };
        frame.errcode = frame.get_i32("errcode")?;
        frame.errmsg = frame.get_str("errmsg")?.to_string();
        Ok(frame)
    }

    pub fn errcode(&self) -> i32 {
        self.errcode
    }

    pub fn errmsg(&self) -> &str {
        &self.errmsg
    }

    pub fn status_ok(&self) -> bool {
        self.errcode == STATUS_OK
    }

    /// `None` on success, otherwise the api error carried by the frame.
    pub fn error(&self) -> Option<YdError> {
        if self.status_ok() {
            return None;
        }
        Some(YdError::Api {
            code: self.errcode,
            msg: self.errmsg.clone(),
        })
    }

    pub fn check(&self) -> Result<()> {
        self.error().map_or(Ok(()), Err)
    }

    pub fn get_str(&self, key: &str) -> Result<&str> {
        self.field(key)?
            .as_str()
            .ok_or_else(|| type_mismatch(key, "string"))
    }

    /// Any JSON number without a fractional part that fits in `i32`.
    pub fn get_i32(&self, key: &str) -> Result<i32> {
        let v = self.field(key)?;
        v.as_i64()
            .or_else(|| {
                v.as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
            })
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| type_mismatch(key, "int32"))
    }

    /// Open the `encrypt` field, enforcing the app id.
    pub fn open_encrypted(&self, cred: &AppCredential) -> Result<OpenedEnvelope> {
        cred.open(self.get_str("encrypt")?)
    }

    /// Open the `encrypt` field and decode its JSON.
    pub fn decode_encrypted<T: DeserializeOwned>(&self, cred: &AppCredential) -> Result<T> {
        decode_inner(&self.open_encrypted(cred)?.payload)
    }

    fn field(&self, key: &str) -> Result<&Value> {
        self.fields
            .get(key)
            .ok_or_else(|| YdError::MissingField(key.to_string()))
    }
}

fn type_mismatch(field: &str, expected: &'static str) -> YdError {
    YdError::TypeMismatch {
        field: field.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::protocol::envelope::AppKey;

    fn cred() -> AppCredential {
        AppCredential::new(666666, "A1", AppKey::from_bytes([0u8; 32]))
    }

    #[test]
    fn opaque_accessors_report_missing_and_mismatched_fields() {
        let frame =
            ResponseFrame::parse(br#"{"errcode":0,"errmsg":"ok","encrypt":5,"n":3000000000}"#)
                .unwrap();
        assert!(matches!(frame.get_str("nope"), Err(YdError::MissingField(_))));
        assert!(matches!(frame.get_str("encrypt"), Err(YdError::TypeMismatch { .. })));
        assert!(matches!(frame.get_i32("n"), Err(YdError::TypeMismatch { .. })));
        assert_eq!(frame.get_i32("encrypt").unwrap(), 5);
    }

    #[test]
    fn request_frame_round_trips_through_response_accessors() {
        let c = cred();
        let bytes = build_request(&c, &serde_json::json!({"mediaId": "m-1"})).unwrap();

        let v: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["buin"], 666666);
        assert_eq!(v["appId"], "A1");

        let opened = c.open(v["encrypt"].as_str().unwrap()).unwrap();
        let inner: Value = decode_inner(&opened.payload).unwrap();
        assert_eq!(inner["mediaId"], "m-1");
    }

    #[test]
    fn integral_floats_count_as_int32() {
        let ok = ResponseFrame::parse(br#"{"errcode":0.0,"errmsg":"ok"}"#).unwrap();
        assert!(ok.status_ok());

        let denied = ResponseFrame::parse(br#"{"errcode":4.0001e4,"errmsg":"bad token"}"#).unwrap();
        assert!(matches!(denied.check(), Err(YdError::Api { code: 40001, .. })));

        let err = ResponseFrame::parse(br#"{"errcode":0.5,"errmsg":"ok"}"#).unwrap_err();
        assert!(matches!(err, YdError::TypeMismatch { .. }));
        let err = ResponseFrame::parse(br#"{"errcode":1e12,"errmsg":"ok"}"#).unwrap_err();
        assert!(matches!(err, YdError::TypeMismatch { .. }));
    }

    #[test]
    fn non_object_body_is_protocol_error() {
        let err = ResponseFrame::parse(b"[1,2]").unwrap_err();
        assert_eq!(err.kind().as_str(), "PROTOCOL");
    }
}
