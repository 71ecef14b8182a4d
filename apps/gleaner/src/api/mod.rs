//! # Gleaner HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Service metadata
//! - `GET /health` - Health check
//! - `POST {prefix}/analyze` - Analyze one text or a batch
//! - `GET {prefix}/search?topic=...` - Search by topic or keyword
//!
//! `{prefix}` is `Settings::api_prefix` (default `/api`).
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `GLEANER_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `GLEANER_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `GLEANER_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::get_api_key_from_env;
pub use handlers::ApiError;
pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    AnalyzeRequest, AnalyzeResponse, ErrorResponse, HealthResponse, ResultsResponse,
    RootResponse, SearchParams, SearchResponse,
};

use crate::analyze::Analyzer;
use crate::config::Settings;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use gleaner_core::GleanerError;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (2 MiB).
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    /// The analysis pipeline (summarizer + store).
    pub analyzer: Analyzer,
    /// Resolved settings.
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create new app state.
    #[must_use]
    pub fn new(analyzer: Analyzer, settings: Settings) -> Self {
        Self {
            analyzer,
            settings: Arc::new(settings),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Origins allowed when `GLEANER_CORS_ORIGINS` is unset or unusable.
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:8000",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8000",
];

/// Parse a comma-separated origin list, skipping blank and invalid entries.
fn parse_origins(list: &str) -> Vec<HeaderValue> {
    list.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect()
}

fn cors_for(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build the CORS layer from `GLEANER_CORS_ORIGINS`.
///
/// "*" allows every origin; otherwise only the listed origins, falling back
/// to `LOCAL_ORIGINS`.
fn build_cors_layer() -> CorsLayer {
    let configured = std::env::var("GLEANER_CORS_ORIGINS").ok();
    if configured.as_deref().map(str::trim) == Some("*") {
        tracing::warn!("CORS: all origins allowed (GLEANER_CORS_ORIGINS=*)");
        return CorsLayer::permissive();
    }

    let origins = configured.as_deref().map(parse_origins).unwrap_or_default();
    if origins.is_empty() {
        tracing::info!("CORS: localhost origins only");
        return cors_for(parse_origins(&LOCAL_ORIGINS.join(",")));
    }
    tracing::info!(count = origins.len(), "CORS: configured origins allowed");
    cors_for(origins)
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
/// 5. Authentication (if configured)
pub fn create_router(state: AppState) -> Router {
    let prefix = state.settings.api_prefix.clone();

    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = create_rate_limiter(rate_limit);
    if rate_limiter.is_some() {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
    } else {
        tracing::info!("Rate limiting disabled");
    }

    let has_auth = get_api_key_from_env().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set GLEANER_API_KEY environment variable to enable authentication."
        );
    }

    let mut router = Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route(
            &format!("{}/analyze", prefix),
            post(handlers::analyze_handler),
        )
        .route(&format!("{}/search", prefix), get(handlers::search_handler));

    if has_auth {
        router = router.layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer())
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), GleanerError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| GleanerError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Gleaner HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GleanerError::Io(format!("Server error: {}", e)))
}

/// Resolve on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

// =============================================================================
// TESTS
// =============================================================================
