//! CLI subcommands.

pub mod ask;
pub mod chat;
pub mod doctor;
pub mod onboard;

use std::sync::Arc;

use tracing::warn;

use algomentor_config::AppConfig;
use algomentor_core::extractor::{ImageInput, TextExtractor};
use algomentor_core::retriever::Retriever;
use algomentor_core::store::SessionStore;
use algomentor_index::{IndexFile, StaticRetriever, VectorIndexRetriever};
use algomentor_ocr::OcrClient;
use algomentor_session::{EngineSettings, InMemorySessionStore, TurnEngine};

/// Assemble the turn engine from configuration: provider, retriever (index
/// loaded once, read-only), optional OCR extractor, in-memory session store.
pub(crate) fn build_engine(config: &AppConfig) -> TurnEngine {
    let provider = algomentor_providers::from_config(&config.provider);

    let retriever: Arc<dyn Retriever> = match IndexFile::load(&config.index.path) {
        Ok(index) => Arc::new(VectorIndexRetriever::new(index, Arc::clone(&provider))),
        Err(e) => {
            warn!(error = %e, "Passage index unavailable, answering without retrieved context");
            Arc::new(StaticRetriever::new(Vec::new()))
        }
    };

    let extractor: Option<Arc<dyn TextExtractor>> = if config.ocr.enabled {
        Some(Arc::new(OcrClient::from_config(&config.ocr)))
    } else {
        None
    };

    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    TurnEngine::new(
        provider,
        retriever,
        extractor,
        store,
        EngineSettings::from_config(config),
    )
}

/// Read an image from disk for a turn. Unreadable files are reported to the
/// user; the turn proceeds without the image.
pub(crate) fn load_image(path: &std::path::Path) -> Option<ImageInput> {
    match std::fs::read(path) {
        Ok(bytes) => Some(ImageInput::new(bytes)),
        Err(e) => {
            eprintln!("Could not read image {}: {e}", path.display());
            None
        }
    }
}
