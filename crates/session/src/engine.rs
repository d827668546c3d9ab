//! The turn engine — one `handle_turn` per incoming user message.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use algomentor_config::AppConfig;
use algomentor_core::error::SessionError;
use algomentor_core::extractor::{ImageInput, TextExtractor};
use algomentor_core::message::{Conversation, Message, SessionId};
use algomentor_core::provider::{GenerateRequest, Provider};
use algomentor_core::retriever::{Passage, Retriever};
use algomentor_core::store::SessionStore;

use crate::prompt::{build_augmented_query, merge_inputs, DSA_SYSTEM_PROMPT, NO_TEXT_PLACEHOLDER};

/// Per-engine knobs, taken from configuration.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Chat model passed to the provider
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Max tokens per reply
    pub max_tokens: Option<u32>,

    /// Passages retrieved per turn
    pub top_k: usize,

    /// History bound: 1 system message + N turn messages
    pub max_messages: usize,
}

impl EngineSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.provider.model.clone(),
            temperature: config.provider.temperature,
            max_tokens: Some(config.provider.max_tokens),
            top_k: config.index.top_k,
            max_messages: config.history.max_messages,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            model: "llama3.2:latest".into(),
            temperature: 0.7,
            max_tokens: Some(1024),
            top_k: 2,
            max_messages: 21,
        }
    }
}

/// What a completed turn hands back to the front-end.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The assistant's reply text
    pub reply: String,

    /// Passages that were fused into the turn's prompt (may be empty)
    pub context_used: Vec<Passage>,

    /// Raw text extracted from the attached image, if one was supplied
    pub extracted_text: Option<String>,
}

/// Orchestrates one conversational turn against the three external
/// collaborators. Stateless apart from the in-flight session set; all
/// conversation state lives in the `SessionStore`.
pub struct TurnEngine {
    provider: Arc<dyn Provider>,
    retriever: Arc<dyn Retriever>,
    extractor: Option<Arc<dyn TextExtractor>>,
    store: Arc<dyn SessionStore>,
    settings: EngineSettings,
    in_flight: Arc<Mutex<HashSet<SessionId>>>,
}

impl TurnEngine {
    pub fn new(
        provider: Arc<dyn Provider>,
        retriever: Arc<dyn Retriever>,
        extractor: Option<Arc<dyn TextExtractor>>,
        store: Arc<dyn SessionStore>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            provider,
            retriever,
            extractor,
            store,
            settings,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Process one user turn.
    ///
    /// Exactly one retriever call, zero-or-one extractor calls, and exactly
    /// one provider call per invocation. Retriever and extractor failures
    /// degrade (empty context / placeholder text); a provider failure
    /// surfaces as `SessionError::Generation` with the turn's user message
    /// retained in the conversation and no assistant message appended.
    pub async fn handle_turn(
        &self,
        session: &SessionId,
        user_text: &str,
        image: Option<ImageInput>,
    ) -> Result<TurnOutcome, SessionError> {
        let _guard = self.acquire(session)?;

        // No image and blank text: nothing actionable, no external calls,
        // no state mutation.
        if image.is_none() && user_text.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }

        // Recovery default: a missing conversation gets the fixed system
        // prompt rather than failing the turn.
        let mut conversation = match self.store.get(session).await {
            Some(conv) => conv,
            None => Conversation::with_id(session.clone(), DSA_SYSTEM_PROMPT),
        };

        // Step 1 — image merge
        let extracted = match image {
            Some(ref img) => Some(self.extract_text(img).await),
            None => None,
        };
        let merged = merge_inputs(user_text, extracted.as_deref())
            .ok_or(SessionError::EmptyInput)?;

        // Step 2 — retrieval (degrade to empty context on failure)
        let passages = match self.retriever.search(&merged, self.settings.top_k).await {
            Ok(passages) => passages,
            Err(e) => {
                warn!(session = %session, error = %e, "Retrieval degraded, proceeding with empty context");
                Vec::new()
            }
        };
        debug!(session = %session, passages = passages.len(), "Context retrieved");

        // Step 3 — context fusion
        let augmented = build_augmented_query(&passages, &merged);

        // Step 4 — history append. The user message is persisted before
        // generation and is retained even if generation fails.
        conversation.push(Message::user(augmented));
        conversation.enforce_bound(self.settings.max_messages);
        self.store.put(conversation.clone()).await;

        // Step 5 — generation over the entire current conversation
        let started = std::time::Instant::now();
        let response = self
            .provider
            .generate(GenerateRequest {
                model: self.settings.model.clone(),
                messages: conversation.messages.clone(),
                temperature: self.settings.temperature,
                max_tokens: self.settings.max_tokens,
            })
            .await
            .map_err(SessionError::Generation)?;

        // Steps 6–7 — reply append and bound enforcement
        conversation.push(Message::assistant(&response.content));
        conversation.enforce_bound(self.settings.max_messages);
        self.store.put(conversation).await;

        info!(
            session = %session,
            model = %response.model,
            passages = passages.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Turn complete"
        );

        Ok(TurnOutcome {
            reply: response.content,
            context_used: passages,
            extracted_text: extracted,
        })
    }

    /// Run the extractor; degrade failures and empty results to the
    /// diagnostic placeholder so an image turn always has usable text.
    async fn extract_text(&self, image: &ImageInput) -> String {
        let Some(extractor) = &self.extractor else {
            warn!("Image supplied but no extractor configured");
            return NO_TEXT_PLACEHOLDER.to_string();
        };

        match extractor.extract(image).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                debug!("Extractor found no text, substituting placeholder");
                NO_TEXT_PLACEHOLDER.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Extraction degraded, substituting placeholder");
                NO_TEXT_PLACEHOLDER.to_string()
            }
        }
    }

    /// Mark the session as having a turn in flight, or reject.
    fn acquire(&self, session: &SessionId) -> Result<InFlightGuard, SessionError> {
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|e| SessionError::Store(e.to_string()))?;

        if !in_flight.insert(session.clone()) {
            return Err(SessionError::SessionBusy {
                session: session.clone(),
            });
        }

        Ok(InFlightGuard {
            set: Arc::clone(&self.in_flight),
            session: session.clone(),
        })
    }
}

/// Releases the in-flight mark on every exit path.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<SessionId>>>,
    session: SessionId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut set) = self.set.lock() {
            set.remove(&self.session);
        }
    }
}
