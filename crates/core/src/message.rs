//! Message and Conversation domain types.
//!
//! These are the core value objects that flow through the system:
//! the user sends a turn → the engine augments it with retrieved context →
//! the provider generates a reply → both ends of the turn land in the
//! Conversation, which stays bounded and system-message-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a conversation (session).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The fixed instruction prompt
    System,
    /// The end user (content carries the augmented query)
    User,
    /// The model's reply
    Assistant,
}

/// A single message in a conversation. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// An ordered message history for one user session.
///
/// Always begins with exactly one system message. The turn engine keeps the
/// length within a configured bound after every update; the front-end owns
/// the persistence lifetime (storage, expiry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique session ID
    pub id: SessionId,

    /// Ordered messages, `messages[0]` is the system prompt
    pub messages: Vec<Message>,

    /// When this conversation was created
    pub created_at: DateTime<Utc>,

    /// When the last message was added
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new conversation seeded with the fixed system prompt.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            messages: vec![Message::system(system_prompt)],
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a conversation with a caller-chosen session id.
    pub fn with_id(id: SessionId, system_prompt: impl Into<String>) -> Self {
        let mut conv = Self::new(system_prompt);
        conv.id = id;
        conv
    }

    /// Add a message to the conversation.
    pub fn push(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Enforce the history bound: keep the system message (index 0) plus the
    /// most recent `max_messages - 1` messages, dropping the oldest turn
    /// messages first.
    ///
    /// Because each turn appends a user/assistant pair, the excess is even in
    /// steady state and complete pairs are dropped together. Applying this
    /// twice in succession is a no-op the second time.
    pub fn enforce_bound(&mut self, max_messages: usize) {
        if max_messages == 0 || self.messages.len() <= max_messages {
            return;
        }
        let excess = self.messages.len() - max_messages;
        // Oldest non-system messages go first; index 0 is never touched.
        self.messages.drain(1..1 + excess);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_starts_with_system_message() {
        let conv = Conversation::new("You are a DSA tutor.");
        assert_eq!(conv.messages.len(), 1);
        assert_eq!(conv.messages[0].role, Role::System);
        assert_eq!(conv.messages[0].content, "You are a DSA tutor.");
    }

    #[test]
    fn conversation_tracks_updates() {
        let mut conv = Conversation::new("system");
        let created = conv.created_at;

        conv.push(Message::user("First message"));
        assert_eq!(conv.messages.len(), 2);
        assert!(conv.updated_at >= created);
    }

    #[test]
    fn enforce_bound_keeps_system_and_most_recent() {
        let mut conv = Conversation::new("system");
        for i in 0..12 {
            conv.push(Message::user(format!("q{i}")));
            conv.push(Message::assistant(format!("a{i}")));
        }
        assert_eq!(conv.len(), 25);

        conv.enforce_bound(21);
        assert_eq!(conv.len(), 21);
        assert_eq!(conv.messages[0].role, Role::System);
        // Oldest two pairs dropped; next surviving message is q2.
        assert_eq!(conv.messages[1].content, "q2");
        assert_eq!(conv.messages.last().unwrap().content, "a11");
    }

    #[test]
    fn enforce_bound_is_idempotent() {
        let mut conv = Conversation::new("system");
        for i in 0..15 {
            conv.push(Message::user(format!("q{i}")));
            conv.push(Message::assistant(format!("a{i}")));
        }
        conv.enforce_bound(21);
        let snapshot: Vec<String> = conv.messages.iter().map(|m| m.content.clone()).collect();

        conv.enforce_bound(21);
        let again: Vec<String> = conv.messages.iter().map(|m| m.content.clone()).collect();
        assert_eq!(snapshot, again);
    }

    #[test]
    fn enforce_bound_noop_under_limit() {
        let mut conv = Conversation::new("system");
        conv.push(Message::user("q"));
        conv.push(Message::assistant("a"));
        conv.enforce_bound(21);
        assert_eq!(conv.len(), 3);
    }

    #[test]
    fn enforce_bound_drops_single_oldest_on_odd_excess() {
        // An odd excess can only arise from a caller-assembled history; the
        // single oldest non-system message goes first.
        let mut conv = Conversation::new("system");
        conv.push(Message::user("orphan"));
        for i in 0..10 {
            conv.push(Message::user(format!("q{i}")));
            conv.push(Message::assistant(format!("a{i}")));
        }
        assert_eq!(conv.len(), 22);

        conv.enforce_bound(21);
        assert_eq!(conv.len(), 21);
        assert_eq!(conv.messages[1].content, "q0");
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::user("Test message");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"user\""));
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content, "Test message");
        assert_eq!(deserialized.role, Role::User);
    }
}
