//! In-memory session storage.
//!
//! The default `SessionStore` for the CLI front-end: a session-keyed map
//! behind an async RwLock. Conversations live as long as the process; the
//! front-end decides when to remove them.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use algomentor_core::message::{Conversation, SessionId};
use algomentor_core::store::SessionStore;

/// Session-keyed conversation map.
#[derive(Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<SessionId, Conversation>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &SessionId) -> Option<Conversation> {
        self.inner.read().await.get(id).cloned()
    }

    async fn put(&self, conversation: Conversation) {
        self.inner
            .write()
            .await
            .insert(conversation.id.clone(), conversation);
    }

    async fn remove(&self, id: &SessionId) {
        self.inner.write().await.remove(id);
    }
}
