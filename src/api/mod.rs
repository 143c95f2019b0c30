/// Client side of the A-Prime chat backend.
///
/// The backend owns session storage, title generation, model inference and
/// image generation. This module only speaks its HTTP API.
///
/// # Architecture
///
/// - [`ChatBackend`] - the async seam the sync core talks to
/// - `http` - the reqwest implementation against a running backend
///
/// # Usage
///
/// ```rust,no_run
/// use aprime::api::{ChatBackend, HttpBackend};
/// use aprime::config::ClientConfig;
///
/// # async fn example() -> aprime::api::ApiResult<()> {
/// let backend = HttpBackend::new(ClientConfig::from_env());
/// let sessions = backend.list_sessions().await?;
/// # Ok(())
/// # }
/// ```
mod http;

pub use http::HttpBackend;

use crate::types::{ChatMessage, Session};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("backend error {status}: {body}")]
    Status { status: u16, body: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Answer to a posted chat message.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub new_title: Option<String>,
    /// The session the backend stored the exchange under. Present when the
    /// backend had to create one.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// All sessions, most recently modified first.
    async fn list_sessions(&self) -> ApiResult<Vec<Session>>;

    /// Create an empty session and return its id.
    async fn new_chat(&self) -> ApiResult<String>;

    async fn chat_history(&self, session_id: &str) -> ApiResult<Vec<ChatMessage>>;

    async fn send_chat(&self, message: &str, session_id: Option<&str>) -> ApiResult<ChatReply>;

    async fn delete_session(&self, session_id: &str) -> ApiResult<()>;
}
