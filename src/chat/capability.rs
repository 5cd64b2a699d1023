//! Injected capabilities
//!
//! Browser-only services (speech recognition, camera) and the two external
//! endpoints are reached through these traits. Each has an absent variant
//! for environments without it, so the aggregator runs without a browser.
//!
//! Async traits are `?Send`: the browser front-end implements them on top of
//! JS futures, and native code drives them on a single task.

use super::assembler::ChatRequest;
use super::classify::ExtractFormat;
use super::error::{ChatError, ChatResult};
use super::ingest::{data_url, IncomingFile};
use async_trait::async_trait;

/// Turns a binary document into plain text (the extraction endpoint)
#[async_trait(?Send)]
pub trait Extractor {
    async fn extract(&self, file: &IncomingFile, format: ExtractFormat) -> ChatResult<String>;
}

/// Sends an assembled submission (the completion endpoint)
#[async_trait(?Send)]
pub trait Completion {
    /// Returns the endpoint's response text
    async fn complete(&self, request: &ChatRequest) -> ChatResult<String>;
}

/// Speech-to-text input. Transcripts are delivered back to the view through
/// [`ChatInput::append_transcript`](super::ChatInput::append_transcript).
pub trait SpeechInput {
    fn is_available(&self) -> bool;

    /// Begin listening for one utterance in `language` (e.g. `nl-NL`)
    fn start(&mut self, language: &str) -> ChatResult<()>;

    fn stop(&mut self);
}

/// Still-image capture
#[async_trait(?Send)]
pub trait Camera {
    /// `None` when the user dismissed the capture
    async fn capture(&self) -> ChatResult<Option<CapturedImage>>;
}

/// A camera frame as delivered by the capture collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pub data_url: String,
    pub size_bytes: u64,
}

impl CapturedImage {
    pub fn from_jpeg(bytes: &[u8]) -> Self {
        Self {
            data_url: data_url("image/jpeg", bytes),
            size_bytes: bytes.len() as u64,
        }
    }
}

/// No extraction endpoint configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExtractor;

#[async_trait(?Send)]
impl Extractor for NoExtractor {
    async fn extract(&self, file: &IncomingFile, _format: ExtractFormat) -> ChatResult<String> {
        Err(ChatError::Extraction {
            name: file.name.clone(),
            message: "Document extraction is not available".to_string(),
        })
    }
}

/// No speech recognition in this environment
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

impl SpeechInput for NoSpeech {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self, _language: &str) -> ChatResult<()> {
        Err(ChatError::Unavailable("Speech recognition"))
    }

    fn stop(&mut self) {}
}

/// No camera in this environment
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCamera;

#[async_trait(?Send)]
impl Camera for NoCamera {
    async fn capture(&self) -> ChatResult<Option<CapturedImage>> {
        Err(ChatError::Unavailable("Camera"))
    }
}
