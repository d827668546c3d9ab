//! # Algomentor Core
//!
//! Domain types, traits, and error definitions for the algomentor
//! retrieval-augmented study assistant. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (vector index, OCR engine, LLM runtime,
//! session storage) is defined as a trait here. Implementations live in
//! their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod extractor;
pub mod message;
pub mod provider;
pub mod retriever;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ExtractorError, ProviderError, Result, RetrieverError, SessionError};
pub use extractor::{ImageInput, TextExtractor};
pub use message::{Conversation, Message, Role, SessionId};
pub use provider::{GenerateRequest, GenerateResponse, Provider, Usage};
pub use retriever::{Passage, Retriever};
pub use store::SessionStore;
