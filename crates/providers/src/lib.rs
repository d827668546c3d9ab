//! LLM runtime clients for algomentor.
//!
//! The only backend shipped is [`OllamaProvider`], which speaks the
//! OpenAI-compatible `/chat/completions` and `/embeddings` API exposed by
//! Ollama (and by vLLM, Together, and friends, should anyone point the base
//! URL elsewhere).

mod ollama;

pub use ollama::OllamaProvider;

use std::sync::Arc;

use algomentor_config::ProviderConfig;
use algomentor_core::Provider;

/// Build the provider from configuration.
pub fn from_config(config: &ProviderConfig) -> Arc<dyn Provider> {
    Arc::new(OllamaProvider::new(
        &config.base_url,
        config.timeout_secs,
    ))
}
