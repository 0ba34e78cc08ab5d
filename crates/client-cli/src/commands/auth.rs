//! Login, logout and password flows.
//!
//! Login is the backend-integrated flow: credentials go to
//! `/authentication/login` and the identity the server returns is what
//! the session stores. Nothing here validates passwords locally beyond
//! the retype check on password creation.

use super::{print_error_banner, print_success, prompt};
use crate::api::ApiClient;
use crate::session::Session;
use anyhow::Result;

pub async fn login(
    api: &ApiClient,
    session: &mut Session,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = match email {
        Some(e) => e,
        None => prompt("Email")?,
    };
    let password = match password {
        Some(p) => p,
        None => prompt("Password")?,
    };

    match api.auth().login(&email, &password).await {
        Ok(identity) => {
            session.login(identity.clone())?;
            print_success(&format!(
                "Logged in as {} <{}> ({})",
                identity.name, identity.email, identity.role
            ));
            Ok(())
        }
        Err(e) => {
            print_error_banner(&format!("Login failed: {e}"));
            Ok(())
        }
    }
}

pub fn logout(session: &mut Session) -> Result<()> {
    session.logout()?;
    print_success("Logged out");
    Ok(())
}

pub fn whoami(session: &Session, server: &str) {
    match session.current_identity() {
        Some(identity) => {
            println!("\x1b[32m✓ Logged in\x1b[0m");
            println!("User:   {} <{}>", identity.name, identity.email);
            println!("Role:   {}", identity.role);
            println!("Server: {}", server);
        }
        None => {
            println!("\x1b[33m✗ Not logged in\x1b[0m");
            println!("Run '\x1b[1mhuddle login\x1b[0m' to authenticate");
        }
    }
}

pub async fn create_password(api: &ApiClient, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(e) => e,
        None => prompt("Email")?,
    };
    let password = prompt("New password")?;
    let retyped = prompt("Retype password")?;

    // Validation failure: inline, no network call made.
    if password != retyped {
        print_error_banner("Passwords do not match");
        return Ok(());
    }

    match api.auth().create_password(&email, &password).await {
        Ok(()) => {
            print_success("Password created. You can now log in.");
        }
        Err(e) => {
            print_error_banner(&format!("Could not create password: {e}"));
        }
    }
    Ok(())
}

pub async fn change_password(api: &ApiClient, session: &Session) -> Result<()> {
    let identity = session.require_identity()?;
    let current = prompt("Current password")?;
    let new = prompt("New password")?;
    let retyped = prompt("Retype new password")?;

    if new != retyped {
        print_error_banner("Passwords do not match");
        return Ok(());
    }

    match api
        .auth()
        .change_password(&identity.user_id, &current, &new)
        .await
    {
        Ok(()) => print_success("Password changed"),
        Err(e) => print_error_banner(&format!("Could not change password: {e}")),
    }
    Ok(())
}
