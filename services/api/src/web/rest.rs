//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use oracle_core::{
    domain::{ReadingData, ReadingType, UserData},
    render,
    shop::ShopCategory,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_reading_handler,
        list_categories_handler,
        get_category_handler,
        health_handler,
    ),
    components(
        schemas(CreateReadingRequest, ReadingResponse, ShopCategoryResponse)
    ),
    tags(
        (name = "Mystic Oracle API", description = "Generated readings and the oracle's shop.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The payload for requesting a single reading.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReadingRequest {
    /// `{ "name": .., "dob": "YYYY-MM-DD", "birthPlace": .. }`
    #[schema(value_type = Object)]
    pub user: UserData,
    /// One of `astrology`, `vedic`, `tarot`, `numerology`, `chinese`.
    #[schema(value_type = String)]
    pub reading_type: ReadingType,
    /// Tarot only: the question and mood the cards are drawn for.
    pub context: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadingResponse {
    /// The reading, tagged by `type`.
    #[schema(value_type = Object)]
    pub reading: ReadingData,
    pub markdown: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopCategoryResponse {
    #[schema(value_type = String)]
    pub id: ShopCategory,
    pub name: String,
    pub products: Vec<String>,
}

impl From<ShopCategory> for ShopCategoryResponse {
    fn from(category: ShopCategory) -> Self {
        Self {
            id: category,
            name: category.name().to_string(),
            products: category.products().iter().map(|p| p.to_string()).collect(),
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Generate one reading for the given user.
#[utoipa::path(
    post,
    path = "/readings",
    request_body = CreateReadingRequest,
    responses(
        (status = 200, description = "The generated reading", body = ReadingResponse),
        (status = 400, description = "Incomplete user details, or a type with no reading"),
        (status = 502, description = "Reading generation failed")
    )
)]
pub async fn create_reading_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateReadingRequest>,
) -> Result<Json<ReadingResponse>, (StatusCode, String)> {
    let kind = payload.reading_type.kind().ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!("{} has no reading", payload.reading_type.title()),
        )
    })?;

    if !payload.user.is_complete() {
        return Err((
            StatusCode::BAD_REQUEST,
            "name, dob and birthPlace are required".to_string(),
        ));
    }

    let context = payload
        .context
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    match app_state
        .reading_client
        .fetch_reading(&payload.user, kind, context)
        .await
    {
        Ok(reading) => {
            info!("Served a {} reading.", kind.title());
            Ok(Json(ReadingResponse {
                markdown: render::to_markdown(&reading),
                reading,
            }))
        }
        Err(e) => {
            error!("Failed to create reading: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                "Reading generation failed".to_string(),
            ))
        }
    }
}

/// List the shop's categories with their products.
#[utoipa::path(
    get,
    path = "/shop/categories",
    responses(
        (status = 200, description = "Every category", body = [ShopCategoryResponse])
    )
)]
pub async fn list_categories_handler() -> Json<Vec<ShopCategoryResponse>> {
    Json(ShopCategory::ALL.into_iter().map(Into::into).collect())
}

/// Get one category by name or id.
#[utoipa::path(
    get,
    path = "/shop/categories/{category}",
    params(
        ("category" = String, Path, description = "Display name or snake_case id, e.g. `online_puja`.")
    ),
    responses(
        (status = 200, description = "The category and its products", body = ShopCategoryResponse),
        (status = 404, description = "No such category")
    )
)]
pub async fn get_category_handler(
    Path(category): Path<String>,
) -> Result<Json<ShopCategoryResponse>, (StatusCode, String)> {
    ShopCategory::from_name(&category)
        .map(|c| Json(c.into()))
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("Unknown category '{}'", category),
            )
        })
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "The service is up", body = String))
)]
pub async fn health_handler() -> &'static str {
    "ok"
}
