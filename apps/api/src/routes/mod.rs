pub mod health;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::analysis::handlers;
use crate::config::Config;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/test", get(health::probe_handler))
        // ATS check API
        .route("/api/check-resume", post(handlers::handle_check_resume))
        .route("/api/job-keywords", post(handlers::handle_job_keywords))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Builds the CORS layer from `CORS_ORIGINS`. `*` is fully permissive.
pub fn build_cors_layer(config: &Config) -> Result<CorsLayer> {
    if config.allows_any_origin() {
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("CORS_ORIGINS contains an invalid origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
