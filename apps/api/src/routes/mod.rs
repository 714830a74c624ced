pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::cv::handlers as cv;
use crate::errors::{handle_panic, AppError};
use crate::image::handlers as image;
use crate::state::AppState;

/// Upper bound on any request body. Uploads are additionally capped per file.
pub const MAX_REQUEST_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/cv/upload", post(cv::handle_upload))
        .route("/cv/rewrite", post(cv::handle_rewrite))
        .route("/cv/match", post(cv::handle_match))
        .route("/cv/export", post(cv::handle_export))
        .route("/image/analyze", post(image::handle_analyze))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Fails with a 400 naming every field that is absent or blank.
pub fn require_fields(fields: &[(&str, Option<&str>)]) -> Result<(), AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}
