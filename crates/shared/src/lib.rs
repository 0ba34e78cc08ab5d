pub mod identity;
pub mod models;

pub use identity::{Identity, Role, RoleParseError};
pub use models::{
    AgendaItem, Chat, ChatMessage, ChatParticipant, Meeting, MeetingStatus, Notification,
    Participant, ProgressStage, Recording, Reminder, ReminderRecipient, RoleRecord, Task,
    TaskPriority, TaskStatus, Timeline,
};
