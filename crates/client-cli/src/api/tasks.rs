//! Action-item endpoints, the richest collection on the backend: full
//! CRUD plus progress updates and dedicated server-side search/filter.

use super::{ApiClient, ApiError};
use chrono::NaiveDate;
use serde::Serialize;
use shared::{ProgressStage, Task, TaskPriority, TaskStatus, Timeline};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    /// Email of the assignee; the backend rejects unknown emails.
    pub assignee: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: NaiveDate,
    pub progress: ProgressStage,
    pub timeline: Timeline,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_notes: Option<String>,
}

/// Partial update; only the set fields are sent.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_notes: Option<String>,
}

pub struct TasksApi<'a> {
    pub(super) api: &'a ApiClient,
}

impl TasksApi<'_> {
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        self.api.get_json("/actions").await
    }

    pub async fn get(&self, task_id: &str) -> Result<Task, ApiError> {
        self.api.get_json(&format!("/actions/{task_id}")).await
    }

    pub async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
        self.api.post_json("/actions", task).await
    }

    pub async fn update(&self, task_id: &str, update: &TaskUpdate) -> Result<Task, ApiError> {
        self.api
            .put_json(&format!("/actions/{task_id}"), update)
            .await
    }

    pub async fn delete(&self, task_id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("/actions/{task_id}")).await
    }

    /// Move a task to a progress stage. The response carries the
    /// backend-computed percentage for the new stage.
    pub async fn set_progress(
        &self,
        task_id: &str,
        stage: ProgressStage,
    ) -> Result<Task, ApiError> {
        self.api
            .patch_query(
                &format!("/actions/{task_id}/progress"),
                &[("progress", stage.as_str())],
            )
            .await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Task>, ApiError> {
        self.api
            .get_json_query("/actions/search", &[("q", query)])
            .await
    }

    pub async fn filter(
        &self,
        status: Option<TaskStatus>,
        priority: Option<TaskPriority>,
    ) -> Result<Vec<Task>, ApiError> {
        let status = status.map_or("ALL", |s| s.as_str());
        let priority = priority.map_or("ALL", |p| p.as_str());
        self.api
            .get_json_query("/actions/filter", &[("status", status), ("priority", priority)])
            .await
    }

    pub async fn by_assignee(&self, email: &str) -> Result<Vec<Task>, ApiError> {
        self.api
            .get_json(&format!("/actions/assignee/{email}"))
            .await
    }
}
