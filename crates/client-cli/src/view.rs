//! The list-detail controller behind every admin view.
//!
//! Each view is the same shape: fetch a collection, derive a filtered
//! projection from free-text search plus status and category filters,
//! optionally swap in a server-side search/filter answer, and merge
//! confirmed mutations back into the cached collection. `ListView` holds
//! that state machine once, so the pages only differ in which resource
//! client feeds it and how rows are rendered.
//!
//! Responses are applied by request token, not arrival order: a response
//! belonging to anything but the most recently issued request is dropped,
//! so the latest request always wins even when earlier ones straggle in.

/// A collection entry the controller can project and merge.
pub trait Listed {
    /// Backend-assigned identifier, immutable once created.
    fn id(&self) -> &str;

    /// Fields the free-text search matches against (case-insensitive).
    fn search_haystack(&self) -> Vec<&str>;

    fn status_label(&self) -> Option<&str> {
        None
    }

    fn category_label(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    /// Fetch failed. The previously loaded collection (if any) is kept so
    /// a transient failure never blanks the screen.
    Failed,
}

/// Token identifying one in-flight fetch. Only the latest issued token's
/// response is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// Where the visible projection came from. Server-side answers and the
/// client-side fallback over possibly-stale data must be distinguishable
/// in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Client,
    Server,
}

#[derive(Debug)]
pub struct ListView<T> {
    phase: Phase,
    items: Vec<T>,
    loaded_once: bool,
    error: Option<String>,
    search: String,
    status_filter: Option<String>,
    category_filter: Option<String>,
    server_projection: Option<Vec<T>>,
    latest_token: u64,
    submitting: bool,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListView<T> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            items: Vec::new(),
            loaded_once: false,
            error: None,
            search: String::new(),
            status_filter: None,
            category_filter: None,
            server_projection: None,
            latest_token: 0,
            submitting: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn has_loaded(&self) -> bool {
        self.loaded_once
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status_filter(&self) -> Option<&str> {
        self.status_filter.as_deref()
    }

    pub fn category_filter(&self) -> Option<&str> {
        self.category_filter.as_deref()
    }

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    /// Start a collection fetch. The previous collection stays visible
    /// while the request is in flight.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.phase = Phase::Loading;
        self.latest_token += 1;
        FetchToken(self.latest_token)
    }

    /// Apply a fetch response. Returns `false` if the response was stale
    /// (a newer request has been issued since) and was dropped.
    pub fn finish_fetch(&mut self, token: FetchToken, result: Result<Vec<T>, String>) -> bool {
        if token.0 != self.latest_token {
            tracing::debug!("Dropping stale fetch response (token {})", token.0);
            return false;
        }
        match result {
            Ok(items) => {
                self.items = items;
                self.loaded_once = true;
                self.error = None;
                self.server_projection = None;
                self.phase = Phase::Loaded;
            }
            Err(message) => {
                // Keep whatever was loaded before; just surface the banner.
                self.error = Some(message);
                self.phase = Phase::Failed;
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Filter inputs
    // ------------------------------------------------------------------

    /// Changing any filter input invalidates a server-side projection;
    /// the pure client-side path takes over until a new server answer is
    /// installed.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.server_projection = None;
    }

    pub fn set_status_filter(&mut self, status: Option<String>) {
        self.status_filter = status;
        self.server_projection = None;
    }

    pub fn set_category_filter(&mut self, category: Option<String>) {
        self.category_filter = category;
        self.server_projection = None;
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.status_filter = None;
        self.category_filter = None;
        self.server_projection = None;
    }

    /// Install a server-side search/filter answer. Stale responses are
    /// dropped like fetches; a failed server call leaves the client-side
    /// projection in place as the best-effort fallback.
    pub fn finish_server_projection(
        &mut self,
        token: FetchToken,
        result: Result<Vec<T>, String>,
    ) -> bool {
        if token.0 != self.latest_token {
            tracing::debug!("Dropping stale projection response (token {})", token.0);
            return false;
        }
        self.phase = if self.loaded_once || result.is_ok() {
            Phase::Loaded
        } else {
            Phase::Failed
        };
        match result {
            Ok(items) => {
                self.server_projection = Some(items);
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    pub fn begin_submit(&mut self) {
        self.submitting = true;
    }

    /// Merge a confirmed create: the server's record is appended, never a
    /// locally constructed guess. Returns `true` when the form should be
    /// dismissed (confirmed success only).
    pub fn finish_create(&mut self, result: Result<T, String>) -> bool {
        self.submitting = false;
        match result {
            Ok(record) => {
                self.items.push(record);
                self.error = None;
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }
}

impl<T: Listed> ListView<T> {
    /// Merge a confirmed update by replacing the matching record with the
    /// server's representation.
    pub fn finish_update(&mut self, result: Result<T, String>) -> bool
    where
        T: Clone,
    {
        self.submitting = false;
        match result {
            Ok(record) => {
                replace_by_id(&mut self.items, &record);
                if let Some(projection) = &mut self.server_projection {
                    replace_by_id(projection, &record);
                }
                self.error = None;
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    /// Merge a confirmed delete by removing the record everywhere.
    pub fn finish_delete(&mut self, id: &str, result: Result<(), String>) -> bool {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.items.retain(|item| item.id() != id);
                if let Some(projection) = &mut self.server_projection {
                    projection.retain(|item| item.id() != id);
                }
                self.error = None;
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Projection
    // ------------------------------------------------------------------

    /// The rows to render, with their provenance. A server answer (if
    /// installed) wins; otherwise the pure filter over the cached
    /// collection.
    pub fn visible(&self) -> (Vec<&T>, Projection) {
        if let Some(projection) = &self.server_projection {
            return (projection.iter().collect(), Projection::Server);
        }
        let needle = self.search.to_lowercase();
        let rows = self
            .items
            .iter()
            .filter(|item| {
                let text_match = needle.is_empty()
                    || item
                        .search_haystack()
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle));
                let status_match = self
                    .status_filter
                    .as_deref()
                    .is_none_or(|wanted| item.status_label() == Some(wanted));
                let category_match = self
                    .category_filter
                    .as_deref()
                    .is_none_or(|wanted| item.category_label() == Some(wanted));
                text_match && status_match && category_match
            })
            .collect();
        (rows, Projection::Client)
    }

    /// True when the view has loaded and the current projection matches
    /// nothing: render the empty-state message, not an error.
    pub fn is_empty(&self) -> bool {
        self.loaded_once && self.visible().0.is_empty()
    }
}

fn replace_by_id<T: Listed>(items: &mut [T], record: &T)
where
    T: Clone,
{
    if let Some(slot) = items.iter_mut().find(|item| item.id() == record.id()) {
        *slot = record.clone();
    }
}

// ============================================================================
// Listed impls for the backend collections
// ============================================================================

use shared::{AgendaItem, Chat, Meeting, Notification, Participant, Recording, Reminder, Task};

impl Listed for Task {
    fn id(&self) -> &str {
        &self.task_id
    }

    // Search over title, description and assignee, as on the web console.
    fn search_haystack(&self) -> Vec<&str> {
        vec![&self.title, &self.description, &self.assignee]
    }

    fn status_label(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn category_label(&self) -> Option<&str> {
        Some(self.priority.as_str())
    }
}

impl Listed for Meeting {
    fn id(&self) -> &str {
        &self.meeting_id
    }

    fn search_haystack(&self) -> Vec<&str> {
        vec![&self.name, &self.description]
    }

    fn status_label(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

impl Listed for Participant {
    fn id(&self) -> &str {
        &self.user_id
    }

    fn search_haystack(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.department, &self.status]
    }

    fn status_label(&self) -> Option<&str> {
        Some(&self.status)
    }
}

impl Listed for Recording {
    fn id(&self) -> &str {
        &self.record_id
    }

    fn search_haystack(&self) -> Vec<&str> {
        vec![&self.name, &self.meeting_id]
    }
}

impl Listed for Reminder {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_haystack(&self) -> Vec<&str> {
        vec![&self.message]
    }
}

impl Listed for Notification {
    fn id(&self) -> &str {
        &self.notification_id
    }

    fn search_haystack(&self) -> Vec<&str> {
        vec![&self.message, &self.status, &self.notification_type]
    }

    fn status_label(&self) -> Option<&str> {
        Some(&self.status)
    }
}

impl Listed for AgendaItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_haystack(&self) -> Vec<&str> {
        vec![&self.title, &self.description]
    }
}

impl Listed for Chat {
    fn id(&self) -> &str {
        &self.chat_id
    }

    fn search_haystack(&self) -> Vec<&str> {
        match (&self.name, &self.last_message) {
            (Some(name), Some(last)) => vec![name, last],
            (Some(name), None) => vec![name],
            (None, Some(last)) => vec![last],
            (None, None) => vec![],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{ProgressStage, TaskPriority, TaskStatus, Timeline};

    fn task(id: &str, title: &str, assignee: &str, status: TaskStatus) -> Task {
        Task {
            task_id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            assignee: assignee.to_string(),
            priority: TaskPriority::Medium,
            status,
            due_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
            progress: ProgressStage::NotStarted,
            progress_percentage: 0,
            timeline: Timeline {
                start: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            },
            owner: "Manager".to_string(),
            goal_notes: None,
            relevant_files: None,
        }
    }

    fn loaded_view(tasks: Vec<Task>) -> ListView<Task> {
        let mut view = ListView::new();
        let token = view.begin_fetch();
        assert!(view.finish_fetch(token, Ok(tasks)));
        view
    }

    #[test]
    fn test_fetch_failure_before_first_load_shows_error_only() {
        let mut view: ListView<Task> = ListView::new();
        let token = view.begin_fetch();
        view.finish_fetch(token, Err("connection refused".to_string()));

        assert_eq!(view.phase(), Phase::Failed);
        assert_eq!(view.error(), Some("connection refused"));
        assert!(!view.has_loaded());
        assert!(view.items().is_empty());
    }

    #[test]
    fn test_fetch_failure_preserves_previous_collection() {
        let mut view = loaded_view(vec![task("1", "Prepare agenda", "a@b.com", TaskStatus::Todo)]);

        let token = view.begin_fetch();
        view.finish_fetch(token, Err("timeout".to_string()));

        // Banner up, but the stale collection is still on screen.
        assert_eq!(view.phase(), Phase::Failed);
        assert_eq!(view.error(), Some("timeout"));
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.visible().0.len(), 1);
    }

    #[test]
    fn test_stale_fetch_response_is_dropped() {
        let mut view: ListView<Task> = ListView::new();
        let first = view.begin_fetch();
        let second = view.begin_fetch();

        // The slow first response arrives after the second was issued.
        let applied_second = view.finish_fetch(
            second,
            Ok(vec![task("2", "Fresh", "a@b.com", TaskStatus::Todo)]),
        );
        let applied_first = view.finish_fetch(
            first,
            Ok(vec![task("1", "Stale", "a@b.com", TaskStatus::Todo)]),
        );

        assert!(applied_second);
        assert!(!applied_first);
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.items()[0].title, "Fresh");
    }

    #[test]
    fn test_search_is_case_insensitive_over_haystack() {
        let view = {
            let mut v = loaded_view(vec![
                task("1", "URGENT: fix roadmap", "a@b.com", TaskStatus::Todo),
                task("2", "Write minutes", "urgent-team@b.com", TaskStatus::Todo),
                task("3", "Book room", "c@d.com", TaskStatus::Todo),
            ]);
            v.set_search("urgent");
            v
        };

        let (rows, source) = view.visible();
        assert_eq!(source, Projection::Client);
        let ids: Vec<&str> = rows.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_zero_match_search_yields_empty_state_and_keeps_collection() {
        let mut view = loaded_view(vec![task("1", "Prepare agenda", "a@b.com", TaskStatus::Todo)]);
        view.set_search("no-such-task");

        assert!(view.is_empty());
        assert!(view.visible().0.is_empty());
        // The underlying collection is untouched.
        assert_eq!(view.items().len(), 1);
    }

    #[test]
    fn test_status_and_category_filters_compose_with_search() {
        let mut view = loaded_view(vec![
            task("1", "Review budget", "a@b.com", TaskStatus::Todo),
            task("2", "Review slides", "a@b.com", TaskStatus::Completed),
            task("3", "Send invites", "a@b.com", TaskStatus::Todo),
        ]);
        view.set_search("review");
        view.set_status_filter(Some("TODO".to_string()));

        let (rows, _) = view.visible();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), "1");

        view.set_category_filter(Some("URGENT".to_string()));
        assert!(view.visible().0.is_empty());
    }

    #[test]
    fn test_server_projection_bypasses_pure_path_until_inputs_change() {
        let mut view = loaded_view(vec![
            task("1", "Alpha", "a@b.com", TaskStatus::Todo),
            task("2", "Beta", "a@b.com", TaskStatus::Todo),
        ]);
        view.set_search("alpha");

        let token = view.begin_fetch();
        view.finish_server_projection(
            token,
            Ok(vec![task("2", "Beta", "a@b.com", TaskStatus::Todo)]),
        );

        // The server's answer wins even though the local filter disagrees.
        let (rows, source) = view.visible();
        assert_eq!(source, Projection::Server);
        assert_eq!(rows[0].id(), "2");

        // Touching an input drops the server answer.
        view.set_search("beta");
        assert_eq!(view.visible().1, Projection::Client);
    }

    #[test]
    fn test_failed_server_projection_falls_back_to_client_filter() {
        let mut view = loaded_view(vec![
            task("1", "Urgent thing", "a@b.com", TaskStatus::Todo),
            task("2", "Other", "a@b.com", TaskStatus::Todo),
        ]);
        view.set_search("urgent");

        let token = view.begin_fetch();
        view.finish_server_projection(token, Err("search endpoint down".to_string()));

        // Error surfaced, fallback projection clearly client-side.
        assert_eq!(view.error(), Some("search endpoint down"));
        let (rows, source) = view.visible();
        assert_eq!(source, Projection::Client);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), "1");
    }

    #[test]
    fn test_create_merges_server_record_not_payload() {
        let mut view = loaded_view(vec![]);
        view.begin_submit();

        // The server assigned the id and computed the percentage.
        let mut server_record = task("srv-9", "New task", "a@b.com", TaskStatus::Todo);
        server_record.progress_percentage = 10;

        let dismissed = view.finish_create(Ok(server_record));
        assert!(dismissed);
        assert!(!view.is_submitting());
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.items()[0].task_id, "srv-9");
        assert_eq!(view.items()[0].progress_percentage, 10);
    }

    #[test]
    fn test_failed_create_keeps_collection_and_form() {
        let mut view = loaded_view(vec![task("1", "Existing", "a@b.com", TaskStatus::Todo)]);
        view.begin_submit();

        let dismissed = view.finish_create(Err("assignee email not found".to_string()));
        assert!(!dismissed);
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.error(), Some("assignee email not found"));
    }

    #[test]
    fn test_update_replaces_by_id() {
        let mut view = loaded_view(vec![
            task("1", "Old title", "a@b.com", TaskStatus::Todo),
            task("2", "Other", "a@b.com", TaskStatus::Todo),
        ]);

        let updated = task("1", "New title", "a@b.com", TaskStatus::Review);
        assert!(view.finish_update(Ok(updated)));
        assert_eq!(view.items()[0].title, "New title");
        assert_eq!(view.items()[0].status, TaskStatus::Review);
        assert_eq!(view.items()[1].title, "Other");
    }

    #[test]
    fn test_delete_removes_by_id_from_projection() {
        let mut view = loaded_view(vec![
            task("42", "Doomed", "a@b.com", TaskStatus::Todo),
            task("7", "Kept", "a@b.com", TaskStatus::Todo),
        ]);

        assert!(view.finish_delete("42", Ok(())));
        let ids: Vec<&str> = view.items().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["7"]);
        assert!(view.visible().0.iter().all(|t| t.id() != "42"));
    }

    #[test]
    fn test_failed_delete_leaves_collection_unchanged() {
        let mut view = loaded_view(vec![task("42", "Survivor", "a@b.com", TaskStatus::Todo)]);

        assert!(!view.finish_delete("42", Err("forbidden".to_string())));
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.error(), Some("forbidden"));
    }
}
