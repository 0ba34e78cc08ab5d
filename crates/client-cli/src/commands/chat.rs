//! Chat views. REST shells only: fetch chats and messages, post new
//! messages; there is no live transport.

use super::{load_into, print_success, view_rows};
use crate::api::chat::NewChat;
use crate::api::ApiClient;
use crate::session::Session;
use crate::view::ListView;
use anyhow::Result;
use shared::Chat;

pub async fn list(api: &ApiClient, session: &Session) -> Result<()> {
    let identity = session.require_identity()?;

    let mut view: ListView<Chat> = ListView::new();
    let user_id = identity.user_id.clone();
    load_into(&mut view, async { api.chat().for_user(&user_id).await }).await;

    for chat in view_rows(&view, "chats") {
        let updated = chat
            .updated_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{}  {}  {}",
            chat.chat_id,
            chat.display_name(&identity.user_id),
            updated,
        );
        println!(
            "    {}",
            chat.last_message.as_deref().unwrap_or("No messages yet")
        );
    }
    Ok(())
}

pub async fn messages(api: &ApiClient, session: &Session, chat_id: String) -> Result<()> {
    let identity = session.require_identity()?;

    match api.chat().messages(&chat_id).await {
        Ok(messages) => {
            if messages.is_empty() {
                super::print_empty("messages");
            }
            for message in messages {
                let marker = if message.sender_id == identity.user_id {
                    "me"
                } else {
                    message.sender_name.as_str()
                };
                println!(
                    "[{}] {}: {}",
                    message.timestamp.format("%Y-%m-%d %H:%M"),
                    marker,
                    message.content,
                );
            }
        }
        Err(e) => super::print_error_banner(&e.to_string()),
    }
    Ok(())
}

pub async fn send(
    api: &ApiClient,
    session: &Session,
    chat_id: String,
    content: String,
) -> Result<()> {
    let identity = session.require_identity()?;
    let content = content.trim();
    if content.is_empty() {
        super::print_error_banner("Refusing to send an empty message");
        return Ok(());
    }

    match api.chat().send(&chat_id, &identity.user_id, content).await {
        Ok(sent) => {
            // The backend's copy carries the id and timestamp.
            print_success(&format!(
                "Sent {} at {}",
                sent.message_id,
                sent.timestamp.format("%H:%M:%S")
            ));
        }
        Err(e) => super::print_error_banner(&e.to_string()),
    }
    Ok(())
}

pub async fn create(
    api: &ApiClient,
    session: &Session,
    mut participant_ids: Vec<String>,
    name: Option<String>,
) -> Result<()> {
    let identity = session.require_identity()?;
    if !participant_ids.contains(&identity.user_id) {
        participant_ids.push(identity.user_id.clone());
    }

    match api
        .chat()
        .create(&NewChat {
            participant_ids,
            name,
        })
        .await
    {
        Ok(chat) => print_success(&format!("Created chat {}", chat.chat_id)),
        Err(e) => super::print_error_banner(&e.to_string()),
    }
    Ok(())
}
