//! Reminders view, plus the due-alert pass: reminders inside the one-hour
//! and thirty-minute windows raise alert notifications.

use super::{load_into, print_success, view_rows};
use crate::api::ApiClient;
use crate::view::ListView;
use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use shared::Reminder;

/// Alert messages for reminders whose time is close to `now`: one message
/// per reminder in the (30 min, 1 h] window, another in the (0, 30 min]
/// window. Past reminders raise nothing.
pub fn due_alerts(reminders: &[Reminder], now: NaiveDateTime) -> Vec<String> {
    let mut alerts = Vec::new();
    for reminder in reminders {
        let remaining = reminder.date_time - now;
        let secs = remaining.num_seconds();
        if secs > 1800 && secs <= 3600 {
            alerts.push(format!("Meeting in 1 hour: {}", reminder.message));
        } else if secs > 0 && secs <= 1800 {
            alerts.push(format!("Meeting in 30 minutes: {}", reminder.message));
        }
    }
    alerts
}

pub async fn list(api: &ApiClient) -> Result<()> {
    let mut view: ListView<Reminder> = ListView::new();
    load_into(&mut view, async { api.reminders().list().await }).await;

    for reminder in view_rows(&view, "reminders") {
        println!(
            "{}  {}  {}",
            reminder.id,
            reminder.date_time.format("%Y-%m-%d %H:%M"),
            reminder.message,
        );
        if !reminder.users.is_empty() {
            let emails: Vec<&str> = reminder.users.iter().map(|u| u.email.as_str()).collect();
            println!("    recipients: {}", emails.join(", "));
        }
    }
    Ok(())
}

/// One alerting pass: fetch reminders, post an alert notification for
/// each one inside a warning window.
pub async fn due(api: &ApiClient) -> Result<()> {
    let mut view: ListView<Reminder> = ListView::new();
    load_into(&mut view, async { api.reminders().list().await }).await;
    if let Some(error) = view.error() {
        super::print_error_banner(error);
        return Ok(());
    }

    let alerts = due_alerts(view.items(), Utc::now().naive_utc());
    if alerts.is_empty() {
        println!("\x1b[90mNothing due within the next hour.\x1b[0m");
        return Ok(());
    }
    for message in alerts {
        match api.notifications().alert(&message).await {
            Ok(()) => print_success(&message),
            Err(e) => super::print_error_banner(&format!("Failed to raise alert: {e}")),
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reminder(message: &str, at: NaiveDateTime) -> Reminder {
        Reminder {
            id: "r-1".to_string(),
            message: message.to_string(),
            date_time: at,
            users: vec![],
        }
    }

    fn now() -> NaiveDateTime {
        "2026-09-01T12:00:00".parse().unwrap()
    }

    #[test]
    fn test_one_hour_window() {
        let alerts = due_alerts(&[reminder("Standup", now() + Duration::minutes(45))], now());
        assert_eq!(alerts, vec!["Meeting in 1 hour: Standup"]);
    }

    #[test]
    fn test_thirty_minute_window() {
        let alerts = due_alerts(&[reminder("Standup", now() + Duration::minutes(20))], now());
        assert_eq!(alerts, vec!["Meeting in 30 minutes: Standup"]);
    }

    #[test]
    fn test_past_and_distant_reminders_raise_nothing() {
        let reminders = vec![
            reminder("Past", now() - Duration::minutes(5)),
            reminder("Far", now() + Duration::hours(3)),
        ];
        assert!(due_alerts(&reminders, now()).is_empty());
    }

    #[test]
    fn test_window_boundaries() {
        // Exactly one hour out is still the 1-hour alert; exactly 30
        // minutes out is the 30-minute alert.
        let at_hour = due_alerts(&[reminder("A", now() + Duration::hours(1))], now());
        assert_eq!(at_hour, vec!["Meeting in 1 hour: A"]);

        let at_half = due_alerts(&[reminder("B", now() + Duration::minutes(30))], now());
        assert_eq!(at_half, vec!["Meeting in 30 minutes: B"]);
    }
}
