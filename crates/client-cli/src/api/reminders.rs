use super::{ApiClient, ApiError};
use shared::Reminder;

pub struct RemindersApi<'a> {
    pub(super) api: &'a ApiClient,
}

impl RemindersApi<'_> {
    pub async fn list(&self) -> Result<Vec<Reminder>, ApiError> {
        self.api.get_json("/reminders").await
    }
}
