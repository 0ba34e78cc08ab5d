use super::{ApiClient, ApiError};
use chrono::NaiveDateTime;
use serde::Serialize;
use shared::{Meeting, MeetingStatus};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeeting {
    pub name: String,
    pub description: String,
    pub date_time: NaiveDateTime,
    /// Duration in seconds.
    pub duration: u64,
}

#[derive(Debug, Serialize)]
struct StatusChange {
    status: MeetingStatus,
}

pub struct MeetingsApi<'a> {
    pub(super) api: &'a ApiClient,
}

impl MeetingsApi<'_> {
    pub async fn list(&self) -> Result<Vec<Meeting>, ApiError> {
        self.api.get_json("/meetings").await
    }

    pub async fn get(&self, meeting_id: &str) -> Result<Meeting, ApiError> {
        self.api.get_json(&format!("/meetings/{meeting_id}")).await
    }

    pub async fn create(&self, meeting: &NewMeeting) -> Result<Meeting, ApiError> {
        self.api.post_json("/meetings", meeting).await
    }

    pub async fn delete(&self, meeting_id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("/meetings/{meeting_id}")).await
    }

    pub async fn set_status(
        &self,
        meeting_id: &str,
        status: MeetingStatus,
    ) -> Result<Meeting, ApiError> {
        self.api
            .put_json(
                &format!("/meetings/{meeting_id}/status"),
                &StatusChange { status },
            )
            .await
    }
}
