use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::InlineImage;
use crate::routes::require_fields;
use crate::state::AppState;

pub const NOT_AN_IMAGE_MESSAGE: &str = "mimeType must be an image type such as image/png.";
pub const INVALID_BASE64_MESSAGE: &str = "imageBase64 is not valid base64 data.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageRequest {
    pub prompt: Option<String>,
    pub image_base64: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeImageResponse {
    pub success: bool,
    pub result: String,
}

/// POST /image/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeImageRequest>, JsonRejection>,
) -> Result<Json<AnalyzeImageResponse>, AppError> {
    let Json(req) = payload?;
    let prompt = req.prompt.as_deref();
    let image_base64 = req.image_base64.as_deref();
    let mime_type = req.mime_type.as_deref();
    require_fields(&[
        ("prompt", prompt),
        ("imageBase64", image_base64),
        ("mimeType", mime_type),
    ])?;

    let image = decode_image(
        image_base64.unwrap_or_default(),
        mime_type.unwrap_or_default(),
    )?;
    let result = state
        .model
        .analyze_image(prompt.unwrap_or_default(), &image)
        .await?;

    Ok(Json(AnalyzeImageResponse {
        success: true,
        result,
    }))
}

/// Accepts plain base64 or a `data:<mime>;base64,<payload>` URL.
fn decode_image(encoded: &str, mime_type: &str) -> Result<InlineImage, AppError> {
    let mime_type = mime_type.trim();
    if !mime_type.starts_with("image/") {
        return Err(AppError::InvalidInput(NOT_AN_IMAGE_MESSAGE.to_string()));
    }

    let encoded = encoded.trim();
    let payload = encoded
        .split_once(";base64,")
        .map_or(encoded, |(_, data)| data);
    let data = STANDARD
        .decode(payload)
        .ok()
        .filter(|data| !data.is_empty())
        .ok_or_else(|| AppError::InvalidInput(INVALID_BASE64_MESSAGE.to_string()))?;

    Ok(InlineImage {
        mime_type: mime_type.to_string(),
        data: Bytes::from(data),
    })
}
