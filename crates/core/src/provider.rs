//! Provider trait — the abstraction over the LLM runtime.
//!
//! A Provider knows how to send an ordered message sequence to a model and
//! get a reply back. It is stateless between calls: the turn engine passes
//! the entire bounded conversation on every invocation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::Message;

/// A generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The model to use (e.g., "llama3.2:latest")
    pub model: String,

    /// The full conversation, system message first, unsummarized
    pub messages: Vec<Message>,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The reply text
    pub content: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// An embedding request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// The model to use for embeddings (e.g., "nomic-embed-text")
    pub model: String,

    /// The texts to embed
    pub inputs: Vec<String>,
}

/// An embedding response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// The embedding vectors, one per input text
    pub embeddings: Vec<Vec<f32>>,

    /// Which model was used
    pub model: String,
}

/// The LLM runtime trait.
///
/// The turn engine calls `generate()` without knowing which backend is in
/// use. The vector index calls `embed()` to embed queries against the
/// precomputed passage embeddings.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send the conversation and get a complete reply.
    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> std::result::Result<GenerateResponse, ProviderError>;

    /// Generate embeddings for the given texts.
    ///
    /// Default implementation reports that embeddings aren't supported.
    async fn embed(
        &self,
        _request: EmbeddingRequest,
    ) -> std::result::Result<EmbeddingResponse, ProviderError> {
        Err(ProviderError::NotConfigured(format!(
            "Provider '{}' does not support embeddings",
            self.name()
        )))
    }

    /// List available models for this provider.
    async fn list_models(&self) -> std::result::Result<Vec<String>, ProviderError> {
        Ok(Vec::new())
    }

    /// Health check — can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_serializes_roles_in_order() {
        let req = GenerateRequest {
            model: "llama3.2:latest".into(),
            messages: vec![Message::system("sys"), Message::user("hi")],
            temperature: default_temperature(),
            max_tokens: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        let sys_pos = json.find("\"system\"").unwrap();
        let user_pos = json.find("\"user\"").unwrap();
        assert!(sys_pos < user_pos);
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
    }

    struct NoEmbed;

    #[async_trait]
    impl Provider for NoEmbed {
        fn name(&self) -> &str {
            "no-embed"
        }

        async fn generate(
            &self,
            _request: GenerateRequest,
        ) -> std::result::Result<GenerateResponse, ProviderError> {
            Ok(GenerateResponse {
                content: "ok".into(),
                model: "no-embed".into(),
                usage: None,
            })
        }
    }

    #[tokio::test]
    async fn embed_defaults_to_not_configured() {
        let provider = NoEmbed;
        let err = provider
            .embed(EmbeddingRequest {
                model: "m".into(),
                inputs: vec!["x".into()],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
