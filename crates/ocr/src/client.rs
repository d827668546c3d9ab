//! HTTP client for the OCR sidecar.

use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use algomentor_config::OcrConfig;
use algomentor_core::error::ExtractorError;
use algomentor_core::extractor::{ImageInput, TextExtractor};

/// Client for an OCR service exposing a single POST endpoint that accepts a
/// base64-encoded image and returns the extracted text.
pub struct OcrClient {
    endpoint: String,
    language: String,
    client: reqwest::Client,
}

impl OcrClient {
    pub fn new(endpoint: impl Into<String>, language: impl Into<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.into(),
            language: language.into(),
            client,
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(&config.endpoint, &config.language, config.timeout_secs)
    }

    /// Decode the image locally to verify it is something the service can
    /// work with, and return the format name to send as a hint.
    fn decode_image(image: &ImageInput) -> Result<&'static str, ExtractorError> {
        let format = image::guess_format(&image.bytes)
            .map_err(|e| ExtractorError::UnreadableImage(e.to_string()))?;

        // Full decode catches truncated/corrupt files that the header sniff misses.
        image::load_from_memory(&image.bytes)
            .map_err(|e| ExtractorError::UnreadableImage(e.to_string()))?;

        Ok(match format {
            image::ImageFormat::Png => "png",
            image::ImageFormat::Jpeg => "jpg",
            image::ImageFormat::WebP => "webp",
            image::ImageFormat::Gif => "gif",
            image::ImageFormat::Bmp => "bmp",
            _ => "png",
        })
    }
}

#[async_trait]
impl TextExtractor for OcrClient {
    async fn extract(&self, image: &ImageInput) -> Result<String, ExtractorError> {
        // Unreadable input is "no usable text", not a failed turn.
        let format = match Self::decode_image(image) {
            Ok(format) => format,
            Err(e) => {
                warn!(error = %e, "Image could not be decoded, treating as no text");
                return Ok(String::new());
            }
        };

        let payload = OcrRequest {
            image: base64::engine::general_purpose::STANDARD.encode(&image.bytes),
            format: image
                .format_hint
                .clone()
                .unwrap_or_else(|| format.to_string()),
            language: self.language.clone(),
        };

        debug!(format = %payload.format, bytes = image.bytes.len(), "Sending OCR request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    ExtractorError::ServiceUnavailable(e.to_string())
                } else {
                    ExtractorError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "OCR service returned error");
            return Err(ExtractorError::ServiceUnavailable(format!(
                "status {status}: {body}"
            )));
        }

        let ocr: OcrResponse = response.json().await.map_err(|e| {
            ExtractorError::ServiceUnavailable(format!("unparseable OCR response: {e}"))
        })?;

        debug!(
            chars = ocr.text.len(),
            confidence = ocr.confidence,
            "OCR extraction complete"
        );

        Ok(ocr.text.trim().to_string())
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct OcrRequest {
    image: String,
    format: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    #[serde(default)]
    text: String,

    #[serde(default)]
    confidence: f32,
}
