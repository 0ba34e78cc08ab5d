//! Interactive terminal browser for the action-item view.

mod app;

use crate::api::ApiClient;
use crate::view::FetchToken;
use anyhow::Result;
use shared::Task;

/// A fetch the TUI asked the worker to run, tagged with the controller's
/// token so stale responses can be dropped on arrival.
pub(crate) struct FetchRequest {
    pub token: FetchToken,
    pub kind: FetchKind,
}

pub(crate) enum FetchKind {
    Reload,
    Search(String),
}

pub(crate) struct FetchResponse {
    pub token: FetchToken,
    pub payload: FetchPayload,
}

pub(crate) enum FetchPayload {
    Collection(Result<Vec<Task>, String>),
    Projection(Result<Vec<Task>, String>),
}

/// Run the task browser: a worker task owns the network calls, the UI
/// thread owns the terminal, and the list controller in between applies
/// responses by token.
pub async fn browse_tasks(api: ApiClient, can_manage: bool) -> Result<()> {
    let (request_tx, mut request_rx) = tokio::sync::mpsc::unbounded_channel::<FetchRequest>();
    let (response_tx, response_rx) = std::sync::mpsc::channel::<FetchResponse>();

    let worker = tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            let payload = match request.kind {
                FetchKind::Reload => FetchPayload::Collection(
                    api.tasks().list().await.map_err(|e| e.to_string()),
                ),
                FetchKind::Search(query) => FetchPayload::Projection(
                    api.tasks().search(&query).await.map_err(|e| e.to_string()),
                ),
            };
            if response_tx
                .send(FetchResponse {
                    token: request.token,
                    payload,
                })
                .is_err()
            {
                break;
            }
        }
    });

    let mut app = app::App::new(request_tx, response_rx, can_manage);
    let result = tokio::task::spawn_blocking(move || app.run()).await?;
    worker.abort();
    result?;
    Ok(())
}
