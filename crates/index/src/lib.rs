//! Prebuilt passage index for algomentor.
//!
//! The index is produced offline (passage texts plus their embeddings) and
//! consumed read-only here: loaded once at process start, queried with
//! cosine similarity every turn. Index construction is out of scope.

mod retriever;
mod similarity;
mod store;

pub use retriever::{StaticRetriever, VectorIndexRetriever};
pub use similarity::{cosine_similarity, rank_by_similarity};
pub use store::{IndexFile, IndexedPassage};
