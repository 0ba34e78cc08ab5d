//! Typed access to the backend's REST surface.
//!
//! One `ApiClient` wraps the HTTP client and base URL; each resource
//! collection gets a thin typed accessor (`api.meetings()`, …). Every
//! mutation returns the server's authoritative representation of the
//! affected record; callers merge that and never fabricate
//! server-assigned fields (identifiers, computed percentages, timestamps).

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub mod agendas;
pub mod auth;
pub mod chat;
pub mod meetings;
pub mod notifications;
pub mod recordings;
pub mod reminders;
pub mod tasks;
pub mod users;

pub use agendas::AgendasApi;
pub use auth::AuthApi;
pub use chat::ChatApi;
pub use meetings::MeetingsApi;
pub use notifications::NotificationsApi;
pub use recordings::RecordingsApi;
pub use reminders::RemindersApi;
pub use tasks::TasksApi;
pub use users::UsersApi;

pub const DEFAULT_SERVER: &str = "http://localhost:8080/api";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status from the backend, with the human-readable
    /// message from its `{"message": …}` error body when present.
    #[error("{message}")]
    Backend { status: StatusCode, message: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_backend_denial(&self) -> bool {
        matches!(
            self,
            ApiError::Backend { status, .. }
                if *status == StatusCode::FORBIDDEN || *status == StatusCode::UNAUTHORIZED
        )
    }
}

/// Extract a display message from an error body, falling back to the
/// status line when the body has no usable `message` field.
fn error_message(status: StatusCode, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.message.trim().is_empty() => parsed.message,
        _ => format!("backend returned {status}"),
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ApiError::Backend {
                status,
                message: error_message(status, &body),
            });
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn check(resp: reqwest::Response) -> Result<(), ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::Backend {
            status,
            message: error_message(status, &body),
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!("GET {}", path);
        let resp = self.http.get(self.url(path)).send().await?;
        Self::decode(resp).await
    }

    pub(crate) async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        tracing::debug!("GET {} {:?}", path, query);
        let resp = self.http.get(self.url(path)).query(query).send().await?;
        Self::decode(resp).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!("POST {}", path);
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(resp).await
    }

    pub(crate) async fn post_json_no_content<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        tracing::debug!("POST {}", path);
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        Self::check(resp).await
    }

    pub(crate) async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        tracing::debug!("POST {} {:?}", path, query);
        let resp = self.http.post(self.url(path)).query(query).send().await?;
        Self::decode(resp).await
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!("PUT {}", path);
        let resp = self.http.put(self.url(path)).json(body).send().await?;
        Self::decode(resp).await
    }

    pub(crate) async fn patch_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        tracing::debug!("PATCH {} {:?}", path, query);
        let resp = self.http.patch(self.url(path)).query(query).send().await?;
        Self::decode(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        tracing::debug!("DELETE {}", path);
        let resp = self.http.delete(self.url(path)).send().await?;
        Self::check(resp).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        tracing::debug!("POST {} (multipart)", path);
        let resp = self
            .http
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        Self::decode(resp).await
    }

    // Typed per-resource accessors.

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { api: self }
    }

    pub fn meetings(&self) -> MeetingsApi<'_> {
        MeetingsApi { api: self }
    }

    pub fn tasks(&self) -> TasksApi<'_> {
        TasksApi { api: self }
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { api: self }
    }

    pub fn recordings(&self) -> RecordingsApi<'_> {
        RecordingsApi { api: self }
    }

    pub fn reminders(&self) -> RemindersApi<'_> {
        RemindersApi { api: self }
    }

    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi { api: self }
    }

    pub fn agendas(&self) -> AgendasApi<'_> {
        AgendasApi { api: self }
    }

    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi { api: self }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_backend_body() {
        let msg = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Assignee email not found"}"#,
        );
        assert_eq!(msg, "Assignee email not found");
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        let msg = error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(msg, "backend returned 500 Internal Server Error");

        let empty = error_message(StatusCode::NOT_FOUND, r#"{"message": "  "}"#);
        assert_eq!(empty, "backend returned 404 Not Found");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = ApiClient::new("http://localhost:8080/api/");
        assert_eq!(api.url("/meetings"), "http://localhost:8080/api/meetings");
    }

    #[test]
    fn test_backend_denial_detection() {
        let denied = ApiError::Backend {
            status: StatusCode::FORBIDDEN,
            message: "forbidden".to_string(),
        };
        assert!(denied.is_backend_denial());

        let failed = ApiError::Backend {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".to_string(),
        };
        assert!(!failed.is_backend_denial());
    }
}
