//! TextExtractor trait — OCR over user-supplied images.

use async_trait::async_trait;

use crate::error::ExtractorError;

/// A user-supplied image, as raw bytes plus an optional format hint
/// ("png", "jpg", ...). The front-end does the file I/O.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub format_hint: Option<String>,
}

impl ImageInput {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            format_hint: None,
        }
    }

    pub fn with_format(bytes: Vec<u8>, format: impl Into<String>) -> Self {
        Self {
            bytes,
            format_hint: Some(format.into()),
        }
    }
}

/// Best-effort text extraction from an image.
///
/// Contract: when the image is readable but contains no text, implementations
/// return an empty string rather than an error. The turn engine substitutes a
/// diagnostic placeholder for both empty results and outright failures, so an
/// unreadable image never fails the turn.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, image: &ImageInput) -> std::result::Result<String, ExtractorError>;
}
