//! Direct messages.

use super::{segment, ApiClient};
use crate::error::ApiResult;
use crate::models::{ConversationSummary, DirectMessage, NewMessage};

impl ApiClient {
    /// `POST /dm/send`
    pub async fn send_message(&self, message: &NewMessage) -> ApiResult<DirectMessage> {
        self.post_json("/dm/send", message).await
    }

    /// `GET /dm/{username}/{other}?limit=`
    pub async fn get_conversation(
        &self,
        username: &str,
        other: &str,
        limit: usize,
    ) -> ApiResult<Vec<DirectMessage>> {
        self.get_json(&format!(
            "/dm/{}/{}?limit={}",
            segment(username),
            segment(other),
            limit
        ))
        .await
    }

    /// `GET /dm/conversations/{username}`
    pub async fn list_conversations(&self, username: &str) -> ApiResult<Vec<ConversationSummary>> {
        self.get_json(&format!("/dm/conversations/{}", segment(username)))
            .await
    }
}
