//! Meetings view: list with the upcoming/previous split, scheduling,
//! deletion, and status changes.

use super::{ensure_can_manage, load_into, print_success, view_rows};
use crate::api::meetings::NewMeeting;
use crate::api::ApiClient;
use crate::session::Session;
use crate::view::ListView;
use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use shared::{Meeting, MeetingStatus};

/// Parse a meeting duration given as `HH:MM` into seconds.
pub fn parse_duration(raw: &str) -> Result<u64> {
    let (hours, minutes) = raw
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("duration must be HH:MM, got {raw:?}"))?;
    let hours: u64 = hours.parse()?;
    let minutes: u64 = minutes.parse()?;
    if minutes >= 60 {
        anyhow::bail!("duration minutes must be below 60, got {minutes}");
    }
    Ok(hours * 3600 + minutes * 60)
}

fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60)
}

/// Split a collection into upcoming and previous relative to `now`.
/// Previous meetings display as COMPLETED unless they were CANCELLED,
/// whatever the backend last recorded.
pub fn split_by_time(meetings: &[Meeting], now: NaiveDateTime) -> (Vec<&Meeting>, Vec<Meeting>) {
    let upcoming = meetings.iter().filter(|m| m.date_time >= now).collect();
    let previous = meetings
        .iter()
        .filter(|m| m.date_time < now)
        .cloned()
        .map(|mut m| {
            if m.status != MeetingStatus::Cancelled {
                m.status = MeetingStatus::Completed;
            }
            m
        })
        .collect();
    (upcoming, previous)
}

fn print_meeting(meeting: &Meeting) {
    println!(
        "{}  {}  [{}]  {}  ({})",
        meeting.meeting_id,
        meeting.date_time.format("%Y-%m-%d %H:%M"),
        meeting.status.as_str(),
        meeting.name,
        format_duration(meeting.duration),
    );
    if !meeting.description.is_empty() {
        println!("    {}", meeting.description);
    }
}

pub async fn list(api: &ApiClient, only: Option<TimeWindow>) -> Result<()> {
    let mut view: ListView<Meeting> = ListView::new();
    load_into(&mut view, async { api.meetings().list().await }).await;

    let rows = view_rows(&view, "meetings");
    let now = Utc::now().naive_utc();
    match only {
        None => {
            for meeting in rows {
                print_meeting(meeting);
            }
        }
        Some(TimeWindow::Upcoming) => {
            let owned: Vec<Meeting> = rows.into_iter().cloned().collect();
            let (upcoming, _) = split_by_time(&owned, now);
            for meeting in upcoming {
                print_meeting(meeting);
            }
        }
        Some(TimeWindow::Previous) => {
            let owned: Vec<Meeting> = rows.into_iter().cloned().collect();
            let (_, previous) = split_by_time(&owned, now);
            for meeting in &previous {
                print_meeting(meeting);
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub enum TimeWindow {
    Upcoming,
    Previous,
}

pub async fn create(
    api: &ApiClient,
    session: &Session,
    name: String,
    description: String,
    date_time: NaiveDateTime,
    duration: String,
) -> Result<()> {
    ensure_can_manage(session)?;
    let duration = parse_duration(&duration)?;

    let mut view: ListView<Meeting> = ListView::new();
    view.begin_submit();
    let result = api
        .meetings()
        .create(&NewMeeting {
            name,
            description,
            date_time,
            duration,
        })
        .await
        .map_err(|e| e.to_string());

    if view.finish_create(result) {
        let created = &view.items()[view.items().len() - 1];
        print_success(&format!("Scheduled meeting {}", created.meeting_id));
        print_meeting(created);
    } else if let Some(error) = view.error() {
        super::print_error_banner(error);
    }
    Ok(())
}

pub async fn delete(api: &ApiClient, session: &Session, meeting_id: String) -> Result<()> {
    ensure_can_manage(session)?;
    match api.meetings().delete(&meeting_id).await {
        Ok(()) => print_success(&format!("Deleted meeting {meeting_id}")),
        Err(e) => super::print_error_banner(&e.to_string()),
    }
    Ok(())
}

pub async fn set_status(
    api: &ApiClient,
    session: &Session,
    meeting_id: String,
    status: MeetingStatus,
) -> Result<()> {
    ensure_can_manage(session)?;
    match api.meetings().set_status(&meeting_id, status).await {
        Ok(updated) => {
            print_success(&format!(
                "Meeting {} is now {}",
                updated.meeting_id,
                updated.status.as_str()
            ));
        }
        Err(e) => super::print_error_banner(&e.to_string()),
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meeting(id: &str, date_time: &str, status: MeetingStatus) -> Meeting {
        Meeting {
            meeting_id: id.to_string(),
            name: format!("Meeting {id}"),
            description: String::new(),
            date_time: date_time.parse().unwrap(),
            duration: 3600,
            status,
            user_id: "u-1".to_string(),
        }
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("01:30").unwrap(), 5400);
        assert_eq!(parse_duration("00:05").unwrap(), 300);
        assert!(parse_duration("90").is_err());
        assert!(parse_duration("01:75").is_err());
    }

    #[test]
    fn test_split_by_time_marks_previous_completed_unless_cancelled() {
        let now = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let meetings = vec![
            meeting("past", "2026-08-30T10:00:00", MeetingStatus::Scheduled),
            meeting("gone", "2026-08-20T10:00:00", MeetingStatus::Cancelled),
            meeting("soon", "2026-09-02T10:00:00", MeetingStatus::Scheduled),
        ];

        let (upcoming, previous) = split_by_time(&meetings, now);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].meeting_id, "soon");

        assert_eq!(previous.len(), 2);
        let past = previous.iter().find(|m| m.meeting_id == "past").unwrap();
        assert_eq!(past.status, MeetingStatus::Completed);
        let gone = previous.iter().find(|m| m.meeting_id == "gone").unwrap();
        assert_eq!(gone.status, MeetingStatus::Cancelled);
    }
}
