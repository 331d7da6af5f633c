use std::time::{SystemTime, UNIX_EPOCH};

use ydapp_core::error::Result;
use ydapp_core::protocol::frame::{RequestFrame, ResponseFrame};
use ydapp_core::protocol::payload::TokenGrant;

use super::AppClient;
use crate::endpoints::GET_TOKEN;
use crate::session::Token;

impl AppClient {
    /// Exchange the sealed current timestamp for an access token.
    ///
    /// The token is stored in the session and returned with its lifetime in
    /// seconds. This is the only call made without `accessToken`.
    pub async fn get_token(&self) -> Result<(String, i64)> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let encrypt = self.credential.seal(now.to_string().as_bytes())?;
        let body = RequestFrame::new(&self.credential, encrypt).to_vec()?;

        let reply = self
            .transport
            .post_json(&self.url(GET_TOKEN), &[], body)
            .await?
            .into_success_body()?;
        let frame = ResponseFrame::parse(&reply)?;
        frame.check()?;

        let grant: TokenGrant = frame.decode_encrypted(&self.credential)?;
        self.session
            .replace(Token::new(grant.access_token.clone(), grant.expire_in))
            .await;
        tracing::info!(expire_in = grant.expire_in, "access token refreshed");

        Ok((grant.access_token, grant.expire_in))
    }
}
