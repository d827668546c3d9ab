//! OCR text extraction for algomentor.
//!
//! Talks to an OCR sidecar service over HTTP: the image is decoded and
//! validated locally, base64-encoded, and POSTed as JSON; the service
//! answers with the extracted text and a confidence score.
//!
//! Per the extractor contract, an unreadable image or an image with no text
//! yields `Ok("")` rather than an error — the turn engine substitutes its
//! diagnostic placeholder. Errors are reserved for the service being
//! unreachable or misbehaving (and even those are degraded by the engine).

mod client;

pub use client::OcrClient;
