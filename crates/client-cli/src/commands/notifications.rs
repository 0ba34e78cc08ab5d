//! Notifications view: list and free-text search over message, status
//! and type.

use super::{load_into, view_rows};
use crate::api::ApiClient;
use crate::view::ListView;
use anyhow::Result;
use shared::Notification;

pub async fn list(api: &ApiClient, search: Option<String>) -> Result<()> {
    let mut view: ListView<Notification> = ListView::new();
    load_into(&mut view, async { api.notifications().list().await }).await;
    if let Some(search) = search {
        view.set_search(search);
    }

    for notification in view_rows(&view, "notifications") {
        println!(
            "{}  {}  [{}]  {}",
            notification.notification_id,
            notification.sent_at.format("%Y-%m-%d %H:%M"),
            notification.status,
            notification.message,
        );
        if !notification.notification_type.is_empty() {
            println!("    type: {}", notification.notification_type);
        }
    }
    Ok(())
}
