//! Retriever trait — similarity search over a precomputed passage index.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RetrieverError;

/// A retrieved context passage. Ephemeral: recomputed every turn, never
/// persisted independently of the message it is fused into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    /// The passage text
    pub text: String,

    /// Where the passage came from (document name, page, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Similarity score against the query (set by search)
    #[serde(default)]
    pub score: f32,
}

/// Similarity search over stored passages.
///
/// Failure mode: `search` may fail; the turn engine treats any failure as an
/// empty result and proceeds with the turn.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return the top-k most similar passages for the query, best first.
    async fn search(
        &self,
        query: &str,
        k: usize,
    ) -> std::result::Result<Vec<Passage>, RetrieverError>;
}
