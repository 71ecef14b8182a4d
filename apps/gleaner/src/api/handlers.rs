//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        AnalyzeRequest, AnalyzeResponse, ErrorResponse, HealthResponse, RootResponse,
        SearchParams, SearchResponse,
    },
};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gleaner_core::GleanerError;

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// A pipeline error rendered as `{"detail": ...}`.
///
/// Validation errors are 400; everything else is 500.
#[derive(Debug)]
pub struct ApiError(pub GleanerError);

impl From<GleanerError> for ApiError {
    fn from(e: GleanerError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %self.0, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}

// =============================================================================
// ROOT & HEALTH HANDLERS
// =============================================================================

/// Service metadata.
pub async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(RootResponse::new(
        &state.settings.app_name,
        &state.settings.api_prefix,
    ))
}

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// ANALYZE HANDLER
// =============================================================================

/// Analyze one text or a batch and store the results.
pub async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload
        .map_err(|rejection| GleanerError::InvalidInput(rejection.body_text()))?;
    let input = request.into_input()?;
    let results = state.analyzer.run(&input).await?;
    Ok(Json(AnalyzeResponse { results }))
}

// =============================================================================
// SEARCH HANDLER
// =============================================================================

/// Search stored analyses by topic or keyword.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let results = state.analyzer.search(&params.topic).await?;
    Ok(Json(SearchResponse { results }))
}
