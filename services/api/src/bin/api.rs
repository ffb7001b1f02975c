//! services/api/src/bin/api.rs

use async_openai::{config::OpenAIConfig, Client};
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use oracle_api_lib::{
    adapters::{GeminiAdapter, OpenAiSstAdapter},
    config::Config,
    error::ApiError,
    web::{
        create_reading_handler, get_category_handler, health_handler, list_categories_handler,
        rest::ApiDoc, state::AppState, ws_handler,
    },
};
use oracle_core::{
    client::{GenerationSettings, ReadingClient},
    ports::SpeechToTextService,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let http_client = reqwest::Client::builder().build()?;
    let gemini_adapter = Arc::new(GeminiAdapter::new(
        http_client,
        config.gemini_api_key.clone(),
        config.gemini_api_base.clone(),
    ));
    let reading_client = ReadingClient::new(
        gemini_adapter,
        GenerationSettings {
            model: config.gemini_model.clone(),
            temperature: config.reading_temperature,
        },
    );

    let speech: Option<Arc<dyn SpeechToTextService>> = match &config.openai_api_key {
        Some(key) => {
            let openai_client = Client::with_config(OpenAIConfig::new().with_api_key(key));
            Some(Arc::new(OpenAiSstAdapter::new(
                openai_client,
                config.sst_model.clone(),
            )))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; dictation is disabled.");
            None
        }
    };

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        reading_client,
        speech,
    });

    let allowed_origin = config.allowed_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!(
            "Invalid ALLOWED_ORIGIN '{}': {}",
            config.allowed_origin, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    // --- 4. Create the Web Router ---
    let api_router = Router::new()
        .route("/readings", post(create_reading_handler))
        .route("/shop/categories", get(list_categories_handler))
        .route("/shop/categories/{category}", get(get_category_handler))
        .route("/health", get(health_handler))
        .route("/ws", get(ws_handler))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
