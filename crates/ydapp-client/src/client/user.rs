use ydapp_core::error::Result;
use ydapp_core::protocol::frame::ResponseFrame;
use ydapp_core::protocol::user::UserInfo;

use super::AppClient;
use crate::endpoints::{GET_USER, QUERY_USER_ID};

impl AppClient {
    pub async fn get_user_info(&self, user_id: &str) -> Result<UserInfo> {
        let reply = self.get_authed(GET_USER, &[(QUERY_USER_ID, user_id)]).await?;
        let frame = ResponseFrame::parse(&reply)?;
        frame.check()?;
        frame.decode_encrypted(&self.credential)
    }
}
