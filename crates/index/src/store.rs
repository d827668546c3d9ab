//! On-disk index format.
//!
//! A single JSON file holding the passage texts, their sources, and their
//! precomputed embeddings, plus the name of the embedding model they were
//! built with. Queries must be embedded with the same model.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use algomentor_core::error::RetrieverError;

/// One stored passage with its precomputed embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedPassage {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub embedding: Vec<f32>,
}

/// The persisted index: embedding model name, dimension, passages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexFile {
    /// Embedding model the passages were embedded with
    pub embedding_model: String,

    /// Embedding dimension (every passage must match)
    pub dimension: usize,

    /// The stored passages
    pub passages: Vec<IndexedPassage>,
}

impl IndexFile {
    /// Load and validate the index from disk. Called once at process start;
    /// the result is read-only thereafter.
    pub fn load(path: &Path) -> Result<Self, RetrieverError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RetrieverError::IndexUnavailable(format!("{}: {e}", path.display()))
        })?;

        let index: Self = serde_json::from_str(&content).map_err(|e| {
            RetrieverError::IndexUnavailable(format!("{}: {e}", path.display()))
        })?;

        index.validate()?;

        info!(
            path = %path.display(),
            passages = index.passages.len(),
            dimension = index.dimension,
            model = %index.embedding_model,
            "Passage index loaded"
        );

        Ok(index)
    }

    fn validate(&self) -> Result<(), RetrieverError> {
        if self.dimension == 0 {
            return Err(RetrieverError::IndexUnavailable(
                "index dimension is zero".into(),
            ));
        }
        for (i, p) in self.passages.iter().enumerate() {
            if p.embedding.len() != self.dimension {
                return Err(RetrieverError::IndexUnavailable(format!(
                    "passage {i} has dimension {} (expected {})",
                    p.embedding.len(),
                    self.dimension
                )));
            }
        }
        Ok(())
    }
}
