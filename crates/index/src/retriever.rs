//! Retriever implementations.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use algomentor_core::error::RetrieverError;
use algomentor_core::provider::{EmbeddingRequest, Provider};
use algomentor_core::retriever::{Passage, Retriever};

use crate::similarity::rank_by_similarity;
use crate::store::IndexFile;

/// Similarity search over a loaded passage index.
///
/// The query is embedded through the provider with the same model the index
/// was built with, then ranked against the stored embeddings by cosine
/// similarity. The index itself is immutable after load.
pub struct VectorIndexRetriever {
    index: IndexFile,
    provider: Arc<dyn Provider>,
}

impl VectorIndexRetriever {
    pub fn new(index: IndexFile, provider: Arc<dyn Provider>) -> Self {
        Self { index, provider }
    }

    /// How many passages the index holds.
    pub fn passage_count(&self) -> usize {
        self.index.passages.len()
    }

    /// The embedding model the index was built with.
    pub fn embedding_model(&self) -> &str {
        &self.index.embedding_model
    }
}

#[async_trait]
impl Retriever for VectorIndexRetriever {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Passage>, RetrieverError> {
        let response = self
            .provider
            .embed(EmbeddingRequest {
                model: self.index.embedding_model.clone(),
                inputs: vec![query.to_string()],
            })
            .await
            .map_err(|e| RetrieverError::EmbeddingFailed(e.to_string()))?;

        let query_embedding = response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| RetrieverError::EmbeddingFailed("empty embedding response".into()))?;

        if query_embedding.len() != self.index.dimension {
            return Err(RetrieverError::QueryFailed(format!(
                "query embedding dimension {} does not match index dimension {}",
                query_embedding.len(),
                self.index.dimension
            )));
        }

        let results = rank_by_similarity(&self.index.passages, &query_embedding, k);
        debug!(k, returned = results.len(), "Index search complete");
        Ok(results)
    }
}

/// A fixed in-memory retriever ranked by naive keyword overlap.
///
/// Used in tests and as an offline fallback when no index file is present;
/// it keeps the rest of the pipeline honest without an embedding service.
pub struct StaticRetriever {
    passages: Vec<Passage>,
}

impl StaticRetriever {
    pub fn new(texts: Vec<String>) -> Self {
        Self {
            passages: texts
                .into_iter()
                .map(|text| Passage {
                    text,
                    source: None,
                    score: 0.0,
                })
                .collect(),
        }
    }

    fn overlap(query: &str, text: &str) -> f32 {
        let text_lower = text.to_lowercase();
        let words: Vec<&str> = query
            .split_whitespace()
            .filter(|w| w.len() > 2)
            .collect();
        if words.is_empty() {
            return 0.0;
        }
        let hits = words
            .iter()
            .filter(|w| text_lower.contains(&w.to_lowercase()))
            .count();
        hits as f32 / words.len() as f32
    }
}

#[async_trait]
impl Retriever for StaticRetriever {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Passage>, RetrieverError> {
        let mut scored: Vec<Passage> = self
            .passages
            .iter()
            .map(|p| Passage {
                text: p.text.clone(),
                source: p.source.clone(),
                score: Self::overlap(query, &p.text),
            })
            .filter(|p| p.score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}
