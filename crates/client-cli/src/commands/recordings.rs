use super::{ensure_can_manage, load_into, print_success, view_rows};
use crate::api::ApiClient;
use crate::session::Session;
use crate::view::ListView;
use anyhow::Result;
use shared::Recording;
use std::path::PathBuf;

pub async fn list(api: &ApiClient) -> Result<()> {
    let mut view: ListView<Recording> = ListView::new();
    load_into(&mut view, async { api.recordings().list().await }).await;

    for recording in view_rows(&view, "recordings") {
        println!(
            "{}  {}  (meeting {})  {}",
            recording.record_id, recording.name, recording.meeting_id, recording.file_url,
        );
    }
    Ok(())
}

pub async fn upload(
    api: &ApiClient,
    session: &Session,
    name: String,
    meeting_id: String,
    file: PathBuf,
) -> Result<()> {
    ensure_can_manage(session)?;
    match api.recordings().upload(&name, &meeting_id, &file).await {
        Ok(created) => {
            print_success(&format!(
                "Uploaded recording {} ({})",
                created.record_id, created.file_url
            ));
        }
        Err(e) => super::print_error_banner(&format!("Upload failed: {e}")),
    }
    Ok(())
}
