use super::{ApiClient, ApiError};
use reqwest::multipart::{Form, Part};
use shared::Recording;
use std::path::Path;

pub struct RecordingsApi<'a> {
    pub(super) api: &'a ApiClient,
}

impl RecordingsApi<'_> {
    pub async fn list(&self) -> Result<Vec<Recording>, ApiError> {
        self.api.get_json("/recordings").await
    }

    /// Upload a recording file. The only non-JSON endpoint on the
    /// backend: `multipart/form-data` with `name`, `meetingId` and the
    /// file itself.
    pub async fn upload(
        &self,
        name: &str,
        meeting_id: &str,
        file_path: &Path,
    ) -> Result<Recording, ApiError> {
        let bytes = tokio::fs::read(file_path).await.map_err(|e| {
            ApiError::Decode(format!("could not read {}: {e}", file_path.display()))
        })?;
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("recording")
            .to_string();

        let form = Form::new()
            .text("name", name.to_string())
            .text("meetingId", meeting_id.to_string())
            .part("file", Part::bytes(bytes).file_name(file_name));

        self.api.post_multipart("/recordings/upload", form).await
    }
}
