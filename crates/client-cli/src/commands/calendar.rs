//! Calendar view: meetings grouped by day for one month, past days
//! distinguished from upcoming ones.

use super::{load_into, view_rows};
use crate::api::ApiClient;
use crate::view::ListView;
use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use shared::Meeting;
use std::collections::BTreeMap;

/// Group the meetings that fall in `year`/`month` by day.
pub fn by_day(meetings: &[Meeting], year: i32, month: u32) -> BTreeMap<NaiveDate, Vec<&Meeting>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Meeting>> = BTreeMap::new();
    for meeting in meetings {
        let date = meeting.date_time.date();
        if date.year() == year && date.month() == month {
            days.entry(date).or_default().push(meeting);
        }
    }
    days
}

/// Parse a `YYYY-MM` month selector.
pub fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let (year, month) = raw
        .split_once('-')
        .ok_or_else(|| anyhow::anyhow!("month must be YYYY-MM, got {raw:?}"))?;
    let year: i32 = year.parse()?;
    let month: u32 = month.parse()?;
    if !(1..=12).contains(&month) {
        anyhow::bail!("month must be 01-12, got {month}");
    }
    Ok((year, month))
}

pub async fn show(api: &ApiClient, month: Option<String>) -> Result<()> {
    let now: NaiveDateTime = Utc::now().naive_utc();
    let (year, month) = match month {
        Some(raw) => parse_month(&raw)?,
        None => (now.year(), now.month()),
    };

    let mut view: ListView<Meeting> = ListView::new();
    load_into(&mut view, async { api.meetings().list().await }).await;
    let rows = view_rows(&view, "meetings");
    let owned: Vec<Meeting> = rows.into_iter().cloned().collect();

    let days = by_day(&owned, year, month);
    if days.is_empty() {
        println!("\x1b[90mNo meetings in {year}-{month:02}.\x1b[0m");
        return Ok(());
    }

    println!("\x1b[1m{year}-{month:02}\x1b[0m");
    for (date, meetings) in days {
        let marker = if date < now.date() {
            "\x1b[31m●\x1b[0m" // past
        } else {
            "\x1b[34m●\x1b[0m" // upcoming
        };
        println!("{marker} {date}");
        for meeting in meetings {
            println!(
                "    {}  {}  [{}]",
                meeting.date_time.format("%H:%M"),
                meeting.name,
                meeting.status.as_str(),
            );
        }
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
    fn test_by_day_groups_only_requested_month() {
        let meetings = vec![
            meeting("a", "2026-09-01T09:00:00"),
            meeting("b", "2026-09-01T15:00:00"),
            meeting("c", "2026-10-01T09:00:00"),
        ];
        let days = by_day(&meetings, 2026, 9);
        assert_eq!(days.len(), 1);
        let first = days.values().next().unwrap();
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2026-09").unwrap(), (2026, 9));
        assert!(parse_month("2026").is_err());
        assert!(parse_month("2026-13").is_err());
    }
}
