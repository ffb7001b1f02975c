//! Fakes and builders shared by the service's tests.

use crate::config::Config;
use crate::web::state::AppState;
use async_trait::async_trait;
use oracle_core::{
    client::{GenerationSettings, ReadingClient},
    ports::{GenerationRequest, GenerationService, PortError, PortResult, SpeechToTextService},
};
use std::sync::Arc;
use std::time::Duration;

pub const NUMEROLOGY: &str = r#"{"lifePathNumber":"7","destinyNumber":"3","summary":"Seek."}"#;

pub const SPREAD: &str = r#"{"cards":[
    {"name":"The Star","description":"A figure pours water","meaning":"Hope"},
    {"name":"The Tower","description":"Lightning strikes","meaning":"Change"},
    {"name":"The Sun","description":"A child on a horse","meaning":"Joy"}
],"summary":"Light follows change."}"#;

/// Answers every generation with the same result after an optional delay.
pub struct FakeGenerator {
    reply: Result<String, String>,
    delay: Duration,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            delay: Duration::ZERO,
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err("quota exceeded".to_string()),
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl GenerationService for FakeGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> PortResult<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone().map_err(PortError::Unavailable)
    }
}

/// Hears the same words every time, optionally after a delay.
pub struct FakeSpeech {
    transcript: &'static str,
    delay: Duration,
}

impl FakeSpeech {
    pub fn hearing(transcript: &'static str) -> Self {
        Self {
            transcript,
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl SpeechToTextService for FakeSpeech {
    async fn transcribe_audio(&self, _audio_data: &[u8]) -> PortResult<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.transcript.to_string())
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|name| match name {
        "GEMINI_API_KEY" => Some("test-key".to_string()),
        "SHUFFLE_FLOOR_MS" => Some("5000".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

pub fn app_state(
    generator: FakeGenerator,
    speech: Option<Arc<dyn SpeechToTextService>>,
) -> Arc<AppState> {
    Arc::new(AppState {
        config: Arc::new(test_config()),
        reading_client: ReadingClient::new(Arc::new(generator), GenerationSettings::default()),
        speech,
    })
}
