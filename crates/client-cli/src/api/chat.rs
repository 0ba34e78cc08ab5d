//! Chat endpoints. REST only: messages are fetched and posted, there is
//! no live transport behind this client.

use super::{ApiClient, ApiError};
use serde::Serialize;
use shared::{Chat, ChatMessage};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChat {
    pub participant_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub struct ChatApi<'a> {
    pub(super) api: &'a ApiClient,
}

impl ChatApi<'_> {
    /// All chats the user participates in, sorted most recently updated
    /// first.
    pub async fn for_user(&self, user_id: &str) -> Result<Vec<Chat>, ApiError> {
        let mut chats: Vec<Chat> = self.api.get_json(&format!("/chat/user/{user_id}")).await?;
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(chats)
    }

    pub async fn messages(&self, chat_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        self.api.get_json(&format!("/chat/{chat_id}/messages")).await
    }

    /// Send a message. The backend takes sender and content as query
    /// parameters on this endpoint, not as a JSON body.
    pub async fn send(
        &self,
        chat_id: &str,
        sender_id: &str,
        content: &str,
    ) -> Result<ChatMessage, ApiError> {
        self.api
            .post_query(
                &format!("/chat/{chat_id}/message"),
                &[("senderId", sender_id), ("content", content)],
            )
            .await
    }

    pub async fn create(&self, chat: &NewChat) -> Result<Chat, ApiError> {
        self.api.post_json("/chat/create", chat).await
    }
}
