//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

use crate::adapters::gemini::DEFAULT_API_BASE;
use oracle_core::client::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use oracle_core::tarot::SHUFFLE_FLOOR;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub reading_temperature: f32,
    pub shuffle_floor: Duration,
    /// Dictation is only offered when this is set.
    pub openai_api_key: Option<String>,
    pub sst_model: String,
    pub allowed_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        // --- Server Settings ---
        let bind_address = parse_var("BIND_ADDRESS", var_or("BIND_ADDRESS", "0.0.0.0:3000"))?;

        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let allowed_origin = var_or("ALLOWED_ORIGIN", "http://localhost:3000");

        // --- Generative Service ---
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("GEMINI_API_KEY".to_string()))?;
        let gemini_model = var_or("GEMINI_MODEL", DEFAULT_MODEL);
        let gemini_api_base = var_or("GEMINI_API_BASE", DEFAULT_API_BASE);

        let reading_temperature: f32 = match lookup("READING_TEMPERATURE") {
            Some(raw) => parse_var("READING_TEMPERATURE", raw)?,
            None => DEFAULT_TEMPERATURE,
        };
        if !(0.0..=2.0).contains(&reading_temperature) {
            return Err(ConfigError::InvalidValue(
                "READING_TEMPERATURE".to_string(),
                format!("{} is outside 0.0..=2.0", reading_temperature),
            ));
        }

        let shuffle_floor = match lookup("SHUFFLE_FLOOR_MS") {
            Some(raw) => Duration::from_millis(parse_var("SHUFFLE_FLOOR_MS", raw)?),
            None => SHUFFLE_FLOOR,
        };

        // --- Speech (optional) ---
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());
        let sst_model = var_or("SST_MODEL", "whisper-1");

        Ok(Self {
            bind_address,
            log_level,
            gemini_api_key,
            gemini_model,
            gemini_api_base,
            reading_temperature,
            shuffle_floor,
            openai_api_key,
            sst_model,
            allowed_origin,
        })
    }
}

fn parse_var<T>(name: &str, raw: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))
}
