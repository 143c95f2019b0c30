use super::{ApiError, ApiResult, ChatBackend, ChatReply};
use crate::config::ClientConfig;
use crate::types::{ChatMessage, Session};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    session_id: Option<&'a str>,
}

#[derive(Deserialize)]
struct NewChatResponse {
    session_id: String,
}

async fn read_body(response: Response) -> ApiResult<String> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    Ok(serde_json::from_str(body)?)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = read_body(response).await?;
    decode(&body)
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn list_sessions(&self) -> ApiResult<Vec<Session>> {
        let response = self
            .client
            .get(self.config.endpoint("api/sessions"))
            .send()
            .await?;
        read_json(response).await
    }

    async fn new_chat(&self) -> ApiResult<String> {
        let response = self
            .client
            .post(self.config.endpoint("api/new_chat"))
            .send()
            .await?;
        let created: NewChatResponse = read_json(response).await?;
        Ok(created.session_id)
    }

    async fn chat_history(&self, session_id: &str) -> ApiResult<Vec<ChatMessage>> {
        let url = self
            .config
            .endpoint(&format!("api/chat_history/{session_id}"));
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    async fn send_chat(&self, message: &str, session_id: Option<&str>) -> ApiResult<ChatReply> {
        let response = self
            .client
            .post(self.config.endpoint("api/chat"))
            .json(&ChatRequest {
                message,
                session_id,
            })
            .send()
            .await?;
        read_json(response).await
    }

    async fn delete_session(&self, session_id: &str) -> ApiResult<()> {
        let url = self.config.endpoint(&format!("api/sessions/{session_id}"));
        let response = self.client.delete(url).send().await?;
        read_body(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_keeps_null_session() {
        let body = serde_json::to_value(ChatRequest {
            message: "hi",
            session_id: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"message": "hi", "session_id": null}));
    }

    #[test]
    fn decodes_chat_reply_variants() {
        let reply: ChatReply = decode(r#"{"response":"hello","session_id":"s1"}"#).unwrap();
        assert_eq!(reply.response, "hello");
        assert_eq!(reply.new_title, None);
        assert_eq!(reply.session_id.as_deref(), Some("s1"));

        let reply: ChatReply =
            decode(r#"{"response":"x","new_title":"Plan a trip..."}"#).unwrap();
        assert_eq!(reply.new_title.as_deref(), Some("Plan a trip..."));
    }

    #[test]
    fn decodes_new_chat_and_sessions() {
        let created: NewChatResponse =
            decode(r#"{"session_id":"65f0","title":"New Chat"}"#).unwrap();
        assert_eq!(created.session_id, "65f0");

        let sessions: Vec<Session> = decode(
            r#"[{"session_id":"b","title":"Second","lastModified":"2024-05-02T09:00:00"},
                {"session_id":"a","title":"First","lastModified":"2024-05-01T09:00:00"}]"#,
        )
        .unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, "b");
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode::<ChatReply>("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
