use super::{ApiClient, ApiError};
use serde::Serialize;
use shared::{Participant, RoleRecord};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipant {
    pub name: String,
    pub email: String,
    /// Role identifier from the `/roles` collection.
    pub role: String,
    pub department: String,
}

pub struct UsersApi<'a> {
    pub(super) api: &'a ApiClient,
}

impl UsersApi<'_> {
    pub async fn list(&self) -> Result<Vec<Participant>, ApiError> {
        self.api.get_json("/users").await
    }

    pub async fn get(&self, user_id: &str) -> Result<Participant, ApiError> {
        self.api.get_json(&format!("/users/{user_id}")).await
    }

    pub async fn create(&self, participant: &NewParticipant) -> Result<Participant, ApiError> {
        self.api.post_json("/users", participant).await
    }

    pub async fn delete(&self, user_id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("/users/{user_id}")).await
    }

    pub async fn roles(&self) -> Result<Vec<RoleRecord>, ApiError> {
        self.api.get_json("/roles").await
    }
}
