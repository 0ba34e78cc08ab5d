//! Participants view: users joined with the `/roles` collection so role
//! identifiers render as names.

use super::{ensure_can_manage, print_success, view_rows};
use crate::api::users::NewParticipant;
use crate::api::ApiClient;
use crate::session::Session;
use crate::view::ListView;
use anyhow::Result;
use shared::{Participant, RoleRecord};

/// Resolve a role id to its name; unknown ids render as a placeholder
/// rather than leaking the raw identifier.
pub fn role_name<'a>(roles: &'a [RoleRecord], role_id: &str) -> &'a str {
    roles
        .iter()
        .find(|r| r.role_id == role_id)
        .map(|r| r.role_name.as_str())
        .unwrap_or("UNKNOWN ROLE")
}

pub async fn list(api: &ApiClient, search: Option<String>) -> Result<()> {
    // Roles and users load together, as on the web console.
    let users_api = api.users();
    let roles_fut = users_api.roles();
    let users_fut = users_api.list();
    let (roles, users) = futures::join!(roles_fut, users_fut);

    let roles = roles.unwrap_or_else(|e| {
        super::print_error_banner(&format!("Failed to load roles: {e}"));
        Vec::new()
    });

    let mut view: ListView<Participant> = ListView::new();
    let token = view.begin_fetch();
    view.finish_fetch(token, users.map_err(|e| e.to_string()));
    if let Some(search) = search {
        view.set_search(search);
    }

    for participant in view_rows(&view, "participants") {
        println!(
            "{}  {}  <{}>  {}  {}  [{}]",
            participant.user_id,
            participant.name,
            participant.email,
            role_name(&roles, &participant.role),
            participant.department,
            participant.status,
        );
    }
    Ok(())
}

pub async fn create(
    api: &ApiClient,
    session: &Session,
    name: String,
    email: String,
    role: String,
    department: String,
) -> Result<()> {
    ensure_can_manage(session)?;
    match api
        .users()
        .create(&NewParticipant {
            name,
            email,
            role,
            department,
        })
        .await
    {
        Ok(created) => print_success(&format!("Added participant {}", created.user_id)),
        Err(e) => super::print_error_banner(&e.to_string()),
    }
    Ok(())
}

pub async fn delete(api: &ApiClient, session: &Session, user_id: String) -> Result<()> {
    ensure_can_manage(session)?;
    match api.users().delete(&user_id).await {
        Ok(()) => print_success(&format!("Deleted participant {user_id}")),
        Err(e) => super::print_error_banner(&e.to_string()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_resolution() {
        let roles = vec![RoleRecord {
            role_id: "r-1".to_string(),
            role_name: "MANAGER".to_string(),
            permissions: String::new(),
        }];
        assert_eq!(role_name(&roles, "r-1"), "MANAGER");
        assert_eq!(role_name(&roles, "r-9"), "UNKNOWN ROLE");
    }
}
