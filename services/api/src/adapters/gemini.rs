//! services/api/src/adapters/gemini.rs
//!
//! This module contains the adapter for Google's Gemini `generateContent` REST endpoint.
//! It implements the `GenerationService` port from the `core` crate.

use async_trait::async_trait;
use oracle_core::ports::{GenerationRequest, GenerationService, PortError, PortResult};
use oracle_core::schema::SchemaDescriptor;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Carries the API key; it is never placed in the URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `GenerationService` port over the Gemini REST API.
/// The API key is injected at construction; nothing is read from the environment here.
#[derive(Clone)]
pub struct GeminiAdapter {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl GeminiAdapter {
    pub fn new(client: reqwest::Client, api_key: String, api_base: String) -> Self {
        Self {
            client,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.api_base, model)
    }
}

//=========================================================================================
// `GenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl GenerationService for GeminiAdapter {
    async fn generate(&self, request: &GenerationRequest) -> PortResult<String> {
        let body = GeminiRequest::from(request);

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                PortError::Unavailable(format!("Failed to reach Gemini: {}", e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Gemini returned {}: {}", status, error_text);
            return Err(PortError::Unexpected(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let parsed = response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| {
                PortError::Unexpected(format!(
                    "Failed to parse Gemini response: {}",
                    e.without_url()
                ))
            })?;

        let text = parsed.text();
        debug!("Gemini returned {} characters", text.len());
        Ok(text)
    }
}

//=========================================================================================
// Gemini API types
//=========================================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent>,
    system_instruction: GeminiContent,
    generation_config: GeminiGenerationConfig<'a>,
}

impl<'a> From<&'a GenerationRequest> for GeminiRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            contents: vec![GeminiContent::text(Some("user"), &request.prompt)],
            system_instruction: GeminiContent::text(None, &request.system_instruction),
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig<'a> {
    temperature: f32,
    response_mime_type: &'static str,
    response_schema: &'a SchemaDescriptor,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

impl GeminiResponse {
    /// Text of the first candidate; empty when the model returned nothing.
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
