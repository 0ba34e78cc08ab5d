use super::{load_into, view_rows};
use crate::api::ApiClient;
use crate::view::ListView;
use anyhow::Result;
use shared::AgendaItem;

pub async fn list(api: &ApiClient) -> Result<()> {
    let mut view: ListView<AgendaItem> = ListView::new();
    load_into(&mut view, async { api.agendas().list().await }).await;

    for item in view_rows(&view, "agenda items") {
        println!("{}  {}  (meeting {})", item.id, item.title, item.meeting_id);
        if !item.description.is_empty() {
            println!("    {}", item.description);
        }
    }
    Ok(())
}
