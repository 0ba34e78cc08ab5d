//! Subcommand handlers: each admin page of the console, as a one-shot
//! command built on the shared list-detail controller.

use crate::api::ApiError;
use crate::session::Session;
use crate::view::{ListView, Listed, Projection};
use anyhow::Result;
use std::future::Future;
use std::io::Write;

pub mod agendas;
pub mod auth;
pub mod calendar;
pub mod chat;
pub mod dashboard;
pub mod meetings;
pub mod notifications;
pub mod participants;
pub mod recordings;
pub mod reminders;
pub mod tasks;

/// Drive one fetch through the controller so the command path shares the
/// exact state machine the interactive browser uses.
pub async fn load_into<T, F>(view: &mut ListView<T>, fetch: F)
where
    F: Future<Output = Result<Vec<T>, ApiError>>,
{
    let token = view.begin_fetch();
    let result = fetch.await.map_err(|e| e.to_string());
    view.finish_fetch(token, result);
}

/// Inline, dismissable-in-spirit error banner for a view.
pub fn print_error_banner(message: &str) {
    eprintln!("\x1b[1;31m✖ {}\x1b[0m", message);
}

pub fn print_success(message: &str) {
    println!("\x1b[1;32m✅ {}\x1b[0m", message);
}

pub fn print_empty(what: &str) {
    println!("\x1b[90mNo {} found.\x1b[0m", what);
}

/// Label the provenance of a projection so a client-side fallback over
/// possibly-stale data is never mistaken for a verified server answer.
pub fn print_projection_source(source: Projection) {
    match source {
        Projection::Server => println!("\x1b[90m(server-side result)\x1b[0m"),
        Projection::Client => {
            println!("\x1b[90m(filtered locally over the last fetched collection)\x1b[0m")
        }
    }
}

/// The CLI analogue of hiding mutation controls from non-elevated roles.
/// Presentation only: the backend still enforces the real boundary and
/// its answer is authoritative either way.
pub fn ensure_can_manage(session: &Session) -> Result<()> {
    let identity = session.require_identity()?;
    if !identity.can_manage() {
        anyhow::bail!(
            "this action needs an ADMIN or MANAGER role (you are {})",
            identity.role
        );
    }
    Ok(())
}

pub fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end().to_string())
}

/// Render the standard view frame: error banner if the last fetch or
/// mutation failed, empty-state line if the projection matched nothing.
/// Returns the rows to print.
pub fn view_rows<'a, T: Listed>(view: &'a ListView<T>, what: &str) -> Vec<&'a T> {
    if let Some(error) = view.error() {
        print_error_banner(error);
    }
    let (rows, _) = view.visible();
    if view.has_loaded() && rows.is_empty() {
        print_empty(what);
    }
    rows
}
