//! Action-item view: the richest admin page. Client-side filtering runs
//! through the list controller; `search` and `filter` prefer the backend's
//! dedicated endpoints and fall back to the local projection when those
//! fail, labelled as such.

use super::{ensure_can_manage, load_into, print_success, view_rows};
use crate::api::tasks::{NewTask, TaskUpdate};
use crate::api::ApiClient;
use crate::session::Session;
use crate::view::ListView;
use anyhow::Result;
use chrono::NaiveDate;
use shared::{ProgressStage, Task, TaskPriority, TaskStatus, Timeline};

fn print_task(task: &Task) {
    println!(
        "{}  [{}/{}]  {}  due {}  {}% {}",
        task.task_id,
        task.status.as_str(),
        task.priority.as_str(),
        task.title,
        task.due_date,
        task.progress_percentage,
        task.progress.as_str(),
    );
    println!(
        "    assignee {}  timeline {} → {}",
        task.assignee, task.timeline.start, task.timeline.end
    );
    if !task.description.is_empty() {
        println!("    {}", task.description);
    }
}

fn print_view(view: &ListView<Task>) {
    let (_, source) = view.visible();
    let rows = view_rows(view, "tasks");
    if !rows.is_empty() {
        super::print_projection_source(source);
    }
    for task in rows {
        print_task(task);
    }
}

pub async fn list(
    api: &ApiClient,
    search: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
) -> Result<()> {
    let mut view: ListView<Task> = ListView::new();
    load_into(&mut view, async { api.tasks().list().await }).await;

    if let Some(search) = search {
        view.set_search(search);
    }
    view.set_status_filter(status.map(|s| s.as_str().to_string()));
    view.set_category_filter(priority.map(|p| p.as_str().to_string()));

    print_view(&view);
    Ok(())
}

/// Server-side search with a clearly-labelled client-side fallback over
/// the already-fetched collection.
pub async fn search(api: &ApiClient, query: String) -> Result<()> {
    let mut view: ListView<Task> = ListView::new();
    load_into(&mut view, async { api.tasks().list().await }).await;
    view.set_search(query.clone());

    let token = view.begin_fetch();
    let result = api.tasks().search(&query).await.map_err(|e| e.to_string());
    view.finish_server_projection(token, result);

    print_view(&view);
    Ok(())
}

/// Server-side status/priority filter, same fallback shape as `search`.
pub async fn filter(
    api: &ApiClient,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
) -> Result<()> {
    let mut view: ListView<Task> = ListView::new();
    load_into(&mut view, async { api.tasks().list().await }).await;
    view.set_status_filter(status.map(|s| s.as_str().to_string()));
    view.set_category_filter(priority.map(|p| p.as_str().to_string()));

    let token = view.begin_fetch();
    let result = api
        .tasks()
        .filter(status, priority)
        .await
        .map_err(|e| e.to_string());
    view.finish_server_projection(token, result);

    print_view(&view);
    Ok(())
}

pub async fn by_assignee(api: &ApiClient, email: String) -> Result<()> {
    let mut view: ListView<Task> = ListView::new();
    load_into(&mut view, async { api.tasks().by_assignee(&email).await }).await;
    print_view(&view);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    api: &ApiClient,
    session: &Session,
    title: String,
    description: String,
    assignee: String,
    priority: TaskPriority,
    status: TaskStatus,
    due_date: NaiveDate,
    timeline_start: NaiveDate,
    timeline_end: NaiveDate,
    goal_notes: Option<String>,
) -> Result<()> {
    ensure_can_manage(session)?;
    let owner = session.require_identity()?.name.clone();

    let mut view: ListView<Task> = ListView::new();
    view.begin_submit();
    let result = api
        .tasks()
        .create(&NewTask {
            title,
            description,
            assignee,
            priority,
            status,
            due_date,
            progress: ProgressStage::NotStarted,
            timeline: Timeline {
                start: timeline_start,
                end: timeline_end,
            },
            owner,
            goal_notes,
        })
        .await
        .map_err(|e| e.to_string());

    if view.finish_create(result) {
        let created = &view.items()[view.items().len() - 1];
        print_success(&format!("Created task {}", created.task_id));
        print_task(created);
    } else if let Some(error) = view.error() {
        super::print_error_banner(error);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    api: &ApiClient,
    session: &Session,
    task_id: String,
    title: Option<String>,
    description: Option<String>,
    assignee: Option<String>,
    priority: Option<TaskPriority>,
    status: Option<TaskStatus>,
    due_date: Option<NaiveDate>,
) -> Result<()> {
    ensure_can_manage(session)?;
    let update = TaskUpdate {
        title,
        description,
        assignee,
        priority,
        status,
        due_date,
        goal_notes: None,
    };
    match api.tasks().update(&task_id, &update).await {
        Ok(updated) => {
            print_success(&format!("Updated task {}", updated.task_id));
            print_task(&updated);
        }
        Err(e) => super::print_error_banner(&e.to_string()),
    }
    Ok(())
}

pub async fn delete(api: &ApiClient, session: &Session, task_id: String) -> Result<()> {
    ensure_can_manage(session)?;
    match api.tasks().delete(&task_id).await {
        Ok(()) => print_success(&format!("Deleted task {task_id}")),
        Err(e) => super::print_error_banner(&e.to_string()),
    }
    Ok(())
}

pub async fn set_progress(
    api: &ApiClient,
    session: &Session,
    task_id: String,
    stage: ProgressStage,
) -> Result<()> {
    ensure_can_manage(session)?;
    match api.tasks().set_progress(&task_id, stage).await {
        Ok(updated) => {
            // The percentage comes back computed by the backend.
            print_success(&format!(
                "Task {} progress: {} ({}%)",
                updated.task_id,
                updated.progress.as_str(),
                updated.progress_percentage
            ));
        }
        Err(e) => super::print_error_banner(&e.to_string()),
    }
    Ok(())
}

pub async fn browse(api: &ApiClient, session: &Session) -> Result<()> {
    crate::tui::browse_tasks(api.clone(), session.can_manage()).await
}
