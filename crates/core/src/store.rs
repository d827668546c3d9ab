//! SessionStore trait — session-scoped conversation storage.
//!
//! The front-end owns the persistence lifetime (creation, expiry); the turn
//! engine reads a conversation at the start of a turn and writes it back
//! after each mutation. No ambient global state: the store is passed into
//! the engine explicitly.

use async_trait::async_trait;

use crate::message::{Conversation, SessionId};

/// Key-value storage of conversations by session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the conversation for a session, if one exists.
    async fn get(&self, id: &SessionId) -> Option<Conversation>;

    /// Insert or replace the conversation for its session id.
    async fn put(&self, conversation: Conversation);

    /// Drop a session's conversation (session end).
    async fn remove(&self, id: &SessionId);
}
