//! Dashboard overview: collection counts, the soonest upcoming meetings,
//! and the latest notifications and reminders, all fetched in parallel.

use crate::api::ApiClient;
use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use shared::Meeting;

/// The soonest `limit` meetings strictly after `now`.
pub fn upcoming(meetings: &[Meeting], now: NaiveDateTime, limit: usize) -> Vec<&Meeting> {
    let mut upcoming: Vec<&Meeting> = meetings.iter().filter(|m| m.date_time > now).collect();
    upcoming.sort_by_key(|m| m.date_time);
    upcoming.truncate(limit);
    upcoming
}

pub async fn show(api: &ApiClient) -> Result<()> {
    let meetings_api = api.meetings();
    let recordings_api = api.recordings();
    let users_api = api.users();
    let notifications_api = api.notifications();
    let reminders_api = api.reminders();
    let (meetings, recordings, users, notifications, reminders) = futures::join!(
        meetings_api.list(),
        recordings_api.list(),
        users_api.list(),
        notifications_api.list(),
        reminders_api.list(),
    );

    // A failed collection shows as an inline banner, not a blank screen.
    let meetings = meetings.unwrap_or_else(|e| {
        super::print_error_banner(&format!("meetings: {e}"));
        Vec::new()
    });
    let recordings = recordings.unwrap_or_else(|e| {
        super::print_error_banner(&format!("recordings: {e}"));
        Vec::new()
    });
    let users = users.unwrap_or_else(|e| {
        super::print_error_banner(&format!("participants: {e}"));
        Vec::new()
    });
    let notifications = notifications.unwrap_or_else(|e| {
        super::print_error_banner(&format!("notifications: {e}"));
        Vec::new()
    });
    let reminders = reminders.unwrap_or_else(|e| {
        super::print_error_banner(&format!("reminders: {e}"));
        Vec::new()
    });

    println!("\x1b[1mDashboard Overview\x1b[0m");
    println!(
        "  meetings: {}   recordings: {}   participants: {}",
        meetings.len(),
        recordings.len(),
        users.len(),
    );

    println!();
    println!("\x1b[1mUpcoming meetings\x1b[0m");
    let soon = upcoming(&meetings, Utc::now().naive_utc(), 5);
    if soon.is_empty() {
        println!("  \x1b[90mNo upcoming meetings.\x1b[0m");
    }
    for meeting in soon {
        println!(
            "  {}  {}",
            meeting.date_time.format("%Y-%m-%d %H:%M"),
            meeting.name
        );
    }

    println!();
    println!("\x1b[1mLatest notifications\x1b[0m");
    for notification in notifications.iter().take(3) {
        println!(
            "  {}  {}",
            notification.sent_at.format("%Y-%m-%d %H:%M"),
            notification.message
        );
    }

    println!();
    println!("\x1b[1mReminders\x1b[0m");
    for reminder in reminders.iter().take(3) {
        println!(
            "  {}  {}",
            reminder.date_time.format("%Y-%m-%d %H:%M"),
            reminder.message
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::MeetingStatus;

    fn meeting(id: &str, date_time: &str) -> Meeting {
        Meeting {
            meeting_id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            date_time: date_time.parse().unwrap(),
            duration: 0,
            status: MeetingStatus::Scheduled,
            user_id: String::new(),
        }
    }

    #[test]
    fn test_upcoming_sorts_and_limits() {
        let now: NaiveDateTime = "2026-09-01T12:00:00".parse().unwrap();
        let meetings = vec![
            meeting("c", "2026-09-03T09:00:00"),
            meeting("past", "2026-08-31T09:00:00"),
            meeting("a", "2026-09-01T13:00:00"),
            meeting("b", "2026-09-02T09:00:00"),
        ];

        let soon = upcoming(&meetings, now, 2);
        let ids: Vec<&str> = soon.iter().map(|m| m.meeting_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
