//! Wire contracts for the backend's resource collections.
//!
//! Identifiers are assigned by the backend and immutable; the console only
//! ever caches what the server returned, it never fabricates records or
//! server-computed fields. Datetimes arrive as zone-less ISO strings
//! (`NaiveDateTime`/`NaiveDate`); formatting for display is the console's
//! concern.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// Meetings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "SCHEDULED",
            MeetingStatus::Ongoing => "ONGOING",
            MeetingStatus::Completed => "COMPLETED",
            MeetingStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub meeting_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub date_time: NaiveDateTime,
    /// Duration in seconds.
    pub duration: u64,
    pub status: MeetingStatus,
    #[serde(default)]
    pub user_id: String,
}

// ============================================================================
// Action items
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
            TaskPriority::Urgent => "URGENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Review => "REVIEW",
            TaskStatus::Completed => "COMPLETED",
        }
    }
}

/// Progress stages mirror the backend enum; the matching percentage is
/// computed server-side and only ever echoed back by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStage {
    NotStarted,
    InformationGathering,
    RequirementsAnalysis,
    Implementation,
    Testing,
    Deployment,
}

impl ProgressStage {
    pub const ALL: [ProgressStage; 6] = [
        ProgressStage::NotStarted,
        ProgressStage::InformationGathering,
        ProgressStage::RequirementsAnalysis,
        ProgressStage::Implementation,
        ProgressStage::Testing,
        ProgressStage::Deployment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStage::NotStarted => "NOT_STARTED",
            ProgressStage::InformationGathering => "INFORMATION_GATHERING",
            ProgressStage::RequirementsAnalysis => "REQUIREMENTS_ANALYSIS",
            ProgressStage::Implementation => "IMPLEMENTATION",
            ProgressStage::Testing => "TESTING",
            ProgressStage::Deployment => "DEPLOYMENT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Email of the assignee.
    pub assignee: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: NaiveDate,
    pub progress: ProgressStage,
    /// Percentage derived from the progress stage, backend-computed.
    pub progress_percentage: u8,
    pub timeline: Timeline,
    #[serde(default)]
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_files: Option<Vec<String>>,
}

// ============================================================================
// Participants & roles
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub user_id: String,
    pub name: String,
    /// Role identifier; resolved to a name via the `/roles` collection.
    #[serde(default)]
    pub role: String,
    /// ACTIVE / INACTIVE.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub role_id: String,
    pub role_name: String,
    #[serde(default)]
    pub permissions: String,
}

// ============================================================================
// Recordings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub record_id: String,
    pub name: String,
    pub file_url: String,
    #[serde(default)]
    pub meeting_id: String,
}

// ============================================================================
// Reminders & notifications
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderRecipient {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub message: String,
    pub date_time: NaiveDateTime,
    #[serde(default)]
    pub users: Vec<ReminderRecipient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub notification_type: String,
    pub message: String,
    #[serde(default)]
    pub status: String,
    pub sent_at: NaiveDateTime,
}

// ============================================================================
// Agendas
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub meeting_id: String,
}

// ============================================================================
// Chat
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatParticipant {
    pub user_id: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub chat_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub participants: Vec<ChatParticipant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Chat {
    /// Display name: the chat's own name, or the other participants'
    /// names joined together.
    pub fn display_name(&self, own_user_id: &str) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let others: Vec<&str> = self
            .participants
            .iter()
            .filter(|p| p.user_id != own_user_id)
            .map(|p| p.full_name.as_str())
            .collect();
        if others.is_empty() {
            "(empty chat)".to_string()
        } else {
            others.join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub message_id: String,
    pub chat_id: String,
    pub sender_id: String,
    #[serde(default)]
    pub sender_name: String,
    pub content: String,
    pub timestamp: NaiveDateTime,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserializes_backend_payload() {
        let json = r#"{
            "taskId": "42",
            "title": "Prepare quarterly review",
            "description": "Slides and numbers",
            "assignee": "sam@example.com",
            "priority": "URGENT",
            "status": "IN_PROGRESS",
            "dueDate": "2026-09-15",
            "progress": "IMPLEMENTATION",
            "progressPercentage": 50,
            "timeline": { "start": "2026-09-01", "end": "2026-09-14" },
            "owner": "Manager"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.task_id, "42");
        assert_eq!(task.priority, TaskPriority::Urgent);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.progress, ProgressStage::Implementation);
        assert_eq!(task.progress_percentage, 50);
        assert_eq!(task.goal_notes, None);
    }

    #[test]
    fn test_task_rejects_unknown_status() {
        let json = r#"{
            "taskId": "1",
            "title": "t",
            "assignee": "a@b.com",
            "priority": "LOW",
            "status": "PAUSED",
            "dueDate": "2026-01-01",
            "progress": "NOT_STARTED",
            "progressPercentage": 0,
            "timeline": { "start": "2026-01-01", "end": "2026-01-02" }
        }"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn test_meeting_deserializes_zoneless_datetime() {
        let json = r#"{
            "meetingId": "m-1",
            "name": "Standup",
            "description": "",
            "dateTime": "2026-09-01T09:30:00",
            "duration": 1800,
            "status": "SCHEDULED",
            "userId": "u-1"
        }"#;
        let meeting: Meeting = serde_json::from_str(json).unwrap();
        assert_eq!(meeting.status, MeetingStatus::Scheduled);
        assert_eq!(meeting.date_time.format("%H:%M").to_string(), "09:30");
    }

    #[test]
    fn test_chat_display_name_excludes_self() {
        let chat = Chat {
            chat_id: "c-1".to_string(),
            name: None,
            participants: vec![
                ChatParticipant {
                    user_id: "me".to_string(),
                    full_name: "Me".to_string(),
                },
                ChatParticipant {
                    user_id: "u-2".to_string(),
                    full_name: "Lindiwe Dube".to_string(),
                },
            ],
            last_message: None,
            updated_at: None,
        };
        assert_eq!(chat.display_name("me"), "Lindiwe Dube");

        let named = Chat {
            name: Some("Project X".to_string()),
            ..chat
        };
        assert_eq!(named.display_name("me"), "Project X");
    }

    #[test]
    fn test_notification_tolerates_missing_optional_fields() {
        let json = r#"{
            "notificationId": "n-1",
            "message": "Meeting in 30 minutes: Standup",
            "sentAt": "2026-09-01T09:00:00"
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.status, "");
        assert_eq!(n.notification_type, "");
    }
}
