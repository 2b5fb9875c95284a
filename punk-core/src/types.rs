//! Core types: message role and the transcript message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message, one-to-one with chat-completion API `role` values.
/// Fixed set; no extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl Role {
    /// Lowercase wire form of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn in a conversation. Content and timestamp are set at creation and
/// never mutated; the transcript a message belongs to is append-only and is
/// only ever cleared as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Cached token estimate; `None` only for messages not yet estimated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u32>,
}

impl Message {
    /// Creates a message stamped with the current time.
    pub fn new(role: Role, content: impl Into<String>, tokens: Option<u32>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            tokens,
        }
    }

    pub fn system(content: impl Into<String>, tokens: Option<u32>) -> Self {
        Self::new(Role::System, content, tokens)
    }

    pub fn user(content: impl Into<String>, tokens: Option<u32>) -> Self {
        Self::new(Role::User, content, tokens)
    }

    pub fn assistant(content: impl Into<String>, tokens: Option<u32>) -> Self {
        Self::new(Role::Assistant, content, tokens)
    }
}
