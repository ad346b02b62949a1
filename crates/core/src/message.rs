//! Message and Conversation domain types.
//!
//! A conversation is the append-only record of one session:
//! user question → assistant answer, repeated. Failed answers are recorded
//! too, so a completed exchange always adds exactly two messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The assistant (model answer or rendered failure)
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in a conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Ordered, append-only message history.
///
/// No size limit and no persistence; [`Conversation::clear`] is the only way
/// messages leave.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,

    /// When the last message was added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message to the end of the conversation.
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.push(Message::new(role, content));
    }

    /// Add an already-built message.
    pub fn push(&mut self, message: Message) {
        self.updated_at = Some(message.timestamp);
        self.messages.push(message);
    }

    /// The full ordered history.
    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Reset to empty.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.updated_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("Is 24°C too warm?");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Is 24°C too warm?");
    }

    #[test]
    fn append_preserves_order() {
        let mut conv = Conversation::new();
        conv.append(Role::User, "first");
        conv.append(Role::Assistant, "second");
        conv.append(Role::User, "third");

        let contents: Vec<&str> = conv.history().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(conv.history()[1].role, Role::Assistant);
    }

    #[test]
    fn clear_resets_history() {
        let mut conv = Conversation::new();
        conv.append(Role::User, "hello");
        assert!(conv.updated_at.is_some());

        conv.clear();
        assert!(conv.is_empty());
        assert_eq!(conv.len(), 0);
        assert!(conv.updated_at.is_none());
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("ok")).unwrap();
        assert!(json.contains("\"assistant\""));
    }
}
