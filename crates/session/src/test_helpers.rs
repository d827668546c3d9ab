//! Scripted collaborator doubles shared by the engine tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use algomentor_core::error::{ExtractorError, ProviderError, RetrieverError};
use algomentor_core::extractor::{ImageInput, TextExtractor};
use algomentor_core::provider::{GenerateRequest, GenerateResponse, Provider};
use algomentor_core::retriever::{Passage, Retriever};

/// Returns scripted replies in order. Panics if more calls arrive than
/// replies were provided.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    delay: Option<Duration>,
    fail: bool,
    call_count: AtomicUsize,
}

impl ScriptedProvider {
    pub fn replies(replies: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(String::from).collect()),
            delay: None,
            fail: false,
            call_count: AtomicUsize::new(0),
        })
    }

    pub fn slow_replies(replies: Vec<&str>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(String::from).collect()),
            delay: Some(delay),
            fail: false,
            call_count: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            delay: None,
            fail: true,
            call_count: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        _request: GenerateRequest,
    ) -> Result<GenerateResponse, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail {
            return Err(ProviderError::Network("connection refused".into()));
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedProvider: no more replies");

        Ok(GenerateResponse {
            content: reply,
            model: "scripted".into(),
            usage: None,
        })
    }
}

/// Returns a fixed passage list (or fails), counting calls.
pub struct CountingRetriever {
    passages: Vec<Passage>,
    fail: bool,
    call_count: AtomicUsize,
}

impl CountingRetriever {
    pub fn with_passages(texts: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            passages: texts
                .into_iter()
                .map(|t| Passage {
                    text: t.into(),
                    source: None,
                    score: 0.8,
                })
                .collect(),
            fail: false,
            call_count: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            passages: Vec::new(),
            fail: true,
            call_count: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Retriever for CountingRetriever {
    async fn search(&self, _query: &str, k: usize) -> Result<Vec<Passage>, RetrieverError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(RetrieverError::IndexUnavailable("index gone".into()));
        }

        Ok(self.passages.iter().take(k).cloned().collect())
    }
}

/// Returns fixed text (or fails), counting calls.
pub struct ScriptedExtractor {
    text: Option<String>,
    call_count: AtomicUsize,
}

impl ScriptedExtractor {
    pub fn returning(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: Some(text.to_string()),
            call_count: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            text: None,
            call_count: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for ScriptedExtractor {
    async fn extract(&self, _image: &ImageInput) -> Result<String, ExtractorError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.text {
            Some(text) => Ok(text.clone()),
            None => Err(ExtractorError::ServiceUnavailable("ocr offline".into())),
        }
    }
}
