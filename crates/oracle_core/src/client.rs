//! crates/oracle_core/src/client.rs
//!
//! The Reading Client: one generation call per reading, parsed into a typed
//! [`ReadingData`]. Fails closed; there is no local substitute for a reading.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{ReadingData, ReadingKind, TarotReading, UserData};
use crate::ports::{GenerationRequest, GenerationService, PortError};
use crate::request::{self, ORACLE_SYSTEM_INSTRUCTION};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Why a reading could not be produced. Every variant surfaces to the user
/// as the same "reading generation failed" signal.
#[derive(Debug, thiserror::Error)]
pub enum ReadingError {
    #[error("Reading generation failed: {0}")]
    Generation(#[from] PortError),
    #[error("Reading generation failed: the oracle returned an empty response")]
    EmptyResponse,
    #[error("Reading generation failed: response was not valid JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

pub type ReadingResult<T> = Result<T, ReadingError>;

/// Model settings applied to every generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[derive(Clone)]
pub struct ReadingClient {
    generator: Arc<dyn GenerationService>,
    settings: GenerationSettings,
}

impl ReadingClient {
    pub fn new(generator: Arc<dyn GenerationService>, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Requests one reading. A single attempt, no retries.
    pub async fn fetch_reading(
        &self,
        user: &UserData,
        kind: ReadingKind,
        extra_context: Option<&str>,
    ) -> ReadingResult<ReadingData> {
        let text = self.generate_text(user, kind, extra_context).await?;
        ReadingData::from_json(kind, &text).map_err(|e| {
            error!("Error parsing {} reading: {}", kind.title(), e);
            ReadingError::MalformedResponse(e)
        })
    }

    /// Requests a tarot spread for a question/mood context.
    pub async fn fetch_tarot(&self, user: &UserData, context: &str) -> ReadingResult<TarotReading> {
        let text = self
            .generate_text(user, ReadingKind::Tarot, Some(context))
            .await?;
        serde_json::from_str(&text).map_err(|e| {
            error!("Error parsing tarot reading: {}", e);
            ReadingError::MalformedResponse(e)
        })
    }

    async fn generate_text(
        &self,
        user: &UserData,
        kind: ReadingKind,
        extra_context: Option<&str>,
    ) -> ReadingResult<String> {
        let built = request::build(user, kind, extra_context);
        let generation = GenerationRequest {
            model: self.settings.model.clone(),
            system_instruction: ORACLE_SYSTEM_INSTRUCTION.to_string(),
            prompt: built.prompt,
            temperature: self.settings.temperature,
            response_schema: built.schema,
        };

        info!("Requesting {} reading from model {}", kind.title(), self.settings.model);
        let text = self.generator.generate(&generation).await.map_err(|e| {
            error!("Error generating {} reading: {}", kind.title(), e);
            ReadingError::Generation(e)
        })?;

        if text.trim().is_empty() {
            error!("Error generating {} reading: empty response", kind.title());
            return Err(ReadingError::EmptyResponse);
        }
        Ok(text)
    }
}
