//! Error types for the algomentor domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Each external
//! collaborator has its own error enum, and the propagation policy is part
//! of the contract: retriever and extractor failures are degraded by the
//! turn engine (empty context / placeholder text), provider failures are
//! surfaced to the caller as `SessionError::Generation`.

use thiserror::Error;

use crate::message::SessionId;

/// The top-level error type for all algomentor operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Retriever error: {0}")]
    Retriever(#[from] RetrieverError),

    #[error("Extractor error: {0}")]
    Extractor(#[from] ExtractorError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the turn engine.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No actionable input after merging typed text and image text.
    /// Recoverable: the user must resupply input.
    #[error("No input provided: type a question or attach an image")]
    EmptyInput,

    /// A turn is already in flight for this session. Concurrent turns on
    /// one session are rejected, not serialized.
    #[error("Session {session} already has a turn in flight")]
    SessionBusy { session: SessionId },

    /// The language model runtime failed. Fatal to the turn; the user
    /// message appended before the call is retained, no assistant message
    /// is appended.
    #[error("Generation failed: {0}")]
    Generation(#[from] ProviderError),

    /// Session storage failed.
    #[error("Session store error: {0}")]
    Store(String),
}

/// Errors from the LLM runtime.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Errors from the vector index. The engine always degrades these to an
/// empty context; they never abort a turn.
#[derive(Debug, Error)]
pub enum RetrieverError {
    #[error("Index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Errors from the OCR engine. The engine always degrades these to a
/// diagnostic placeholder; they never abort a turn.
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("Image could not be decoded: {0}")]
    UnreadableImage(String),

    #[error("OCR service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Network error: {0}")]
    Network(String),
}
