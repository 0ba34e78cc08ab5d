use super::{ApiClient, ApiError};
use serde::Serialize;
use shared::Notification;

#[derive(Debug, Serialize)]
struct AlertRequest<'a> {
    message: &'a str,
}

pub struct NotificationsApi<'a> {
    pub(super) api: &'a ApiClient,
}

impl NotificationsApi<'_> {
    pub async fn list(&self) -> Result<Vec<Notification>, ApiError> {
        self.api.get_json("/notifications").await
    }

    /// Raise an alert notification, e.g. for an imminent reminder.
    pub async fn alert(&self, message: &str) -> Result<(), ApiError> {
        self.api
            .post_json_no_content("/notifications/alert", &AlertRequest { message })
            .await
    }
}
