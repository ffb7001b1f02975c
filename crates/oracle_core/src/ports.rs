//! crates/oracle_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the oracle's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the generative API, the speech backend and the clipboard.

use async_trait::async_trait;

use crate::schema::SchemaDescriptor;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, quota).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Generation Request
//=========================================================================================

/// Everything the generative service needs for one structured call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub system_instruction: String,
    pub prompt: String,
    pub temperature: f32,
    /// The JSON shape the response text must follow.
    pub response_schema: SchemaDescriptor,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Runs one generation and returns the raw response text, which may be empty.
    async fn generate(&self, request: &GenerationRequest) -> PortResult<String>;
}

#[async_trait]
pub trait SpeechToTextService: Send + Sync {
    /// Transcribes a slice of audio data into text.
    async fn transcribe_audio(&self, audio_data: &[u8]) -> PortResult<String>;
}

#[async_trait]
pub trait ClipboardService: Send + Sync {
    /// Places `text` on the user's clipboard.
    async fn write_text(&self, text: &str) -> PortResult<()>;
}
