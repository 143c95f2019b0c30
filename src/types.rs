use crate::classify::{MessageKind, classify};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One conversation thread as listed in the sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(alias = "session_id")]
    pub id: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(rename = "lastModified", default)]
    pub last_modified: Option<String>,
}

pub const NEW_CHAT_TITLE: &str = "New Chat";

fn default_title() -> String {
    NEW_CHAT_TITLE.to_string()
}

impl Session {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            last_modified: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default = "new_message_id")]
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_image: bool,
    #[serde(default)]
    pub is_code: bool,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
}

pub fn new_message_id() -> String {
    Uuid::new_v4().to_string()
}

fn now_timestamp() -> Option<String> {
    OffsetDateTime::now_utc().format(&Rfc3339).ok()
}

impl ChatMessage {
    /// The optimistic copy of what the user typed.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: new_message_id(),
            role: Role::User,
            text: text.into(),
            is_image: false,
            is_code: false,
            is_error: false,
            timestamp: now_timestamp(),
        }
    }

    /// A backend response, flagged according to its content.
    pub fn assistant(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = classify(&text);
        Self {
            id: new_message_id(),
            role: Role::Assistant,
            is_image: matches!(kind, MessageKind::Image),
            is_code: matches!(kind, MessageKind::Code { .. }),
            is_error: false,
            text,
            timestamp: now_timestamp(),
        }
    }

    /// Stand-in for a response that never arrived.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            id: new_message_id(),
            role: Role::Assistant,
            text: text.into(),
            is_image: false,
            is_code: false,
            is_error: true,
            timestamp: now_timestamp(),
        }
    }

    /// How the message should be rendered. Server-provided flags win; older
    /// history entries without flags are classified from their text.
    pub fn kind(&self) -> MessageKind {
        if self.role == Role::User || self.is_error {
            return MessageKind::Text;
        }
        if self.is_image {
            return MessageKind::Image;
        }
        match classify(&self.text) {
            MessageKind::Text if self.is_code => crate::classify::parse_code_block(&self.text),
            kind => kind,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}
