use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::cv::upload::{read_upload_form, StoredUpload, NO_FILE_MESSAGE};
use crate::errors::AppError;
use crate::export::{render_cv_pdf, EXPORT_FILENAME};
use crate::extract::DocumentKind;
use crate::models::{ImprovedCv, JobMatchResult, ReviewResult};
use crate::prompts::builder::RewriteInput;
use crate::routes::require_fields;
use crate::state::AppState;

/// Extracted text shorter than this is not worth a model call.
pub const MIN_CV_TEXT_CHARS: usize = 100;
pub const TOO_SHORT_MESSAGE: &str = "CV content is too short or could not be read.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub cv_text: String,
    pub review: ReviewResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRequest {
    pub cv_text: Option<String>,
    pub target_role: Option<String>,
    pub job_description: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResponse {
    pub success: bool,
    pub improved_cv: ImprovedCv,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub cv_text: Option<String>,
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub success: bool,
    #[serde(rename = "match")]
    pub job_match: JobMatchResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub improved_cv: ImprovedCv,
}

/// POST /cv/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| {
        AppError::InvalidInput(format!("Expected a multipart form upload: {}", e.body_text()))
    })?;
    let form = read_upload_form(&mut multipart).await?;
    let upload = form
        .file
        .ok_or_else(|| AppError::InvalidInput(NO_FILE_MESSAGE.to_string()))?;

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        kind = ?upload.kind,
        bytes = upload.bytes.len(),
        file_name = upload.file_name.as_deref().unwrap_or("-"),
        "CV upload received"
    );

    let stored = StoredUpload::write(&state.config.upload_dir, &upload).await?;
    let outcome = review_stored_upload(&state, &stored, upload.kind, form.language.as_deref()).await;
    if let Err(e) = stored.remove() {
        warn!(%request_id, "Failed to remove uploaded CV: {e}");
    }

    let (cv_text, review) = outcome?;
    info!(%request_id, score = review.score.value(), "CV review completed");

    Ok(Json(UploadResponse {
        success: true,
        cv_text,
        review,
    }))
}

async fn review_stored_upload(
    state: &AppState,
    stored: &StoredUpload,
    kind: DocumentKind,
    language: Option<&str>,
) -> Result<(String, ReviewResult), AppError> {
    let cv_text = state.extractor.extract(stored.path(), kind).await?;
    if cv_text.trim().chars().count() < MIN_CV_TEXT_CHARS {
        return Err(AppError::InvalidInput(TOO_SHORT_MESSAGE.to_string()));
    }

    let review = state.model.review(&cv_text, language).await?;
    Ok((cv_text, review))
}

/// POST /cv/rewrite
pub async fn handle_rewrite(
    State(state): State<AppState>,
    payload: Result<Json<RewriteRequest>, JsonRejection>,
) -> Result<Json<RewriteResponse>, AppError> {
    let Json(req) = payload?;
    require_fields(&[("cvText", req.cv_text.as_deref())])?;

    let improved_cv = state
        .model
        .rewrite(RewriteInput {
            cv_text: req.cv_text.as_deref().unwrap_or_default(),
            target_role: req.target_role.as_deref(),
            job_description: req.job_description.as_deref(),
            language: req.language.as_deref(),
        })
        .await?;

    Ok(Json(RewriteResponse {
        success: true,
        improved_cv,
    }))
}

/// POST /cv/match
pub async fn handle_match(
    State(state): State<AppState>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchResponse>, AppError> {
    let Json(req) = payload?;
    let cv_text = req.cv_text.as_deref();
    let job_description = req.job_description.as_deref();
    require_fields(&[("cvText", cv_text), ("jobDescription", job_description)])?;

    let job_match = state
        .model
        .match_job(
            cv_text.unwrap_or_default(),
            job_description.unwrap_or_default(),
        )
        .await?;

    Ok(Json(MatchResponse {
        success: true,
        job_match,
    }))
}

/// POST /cv/export
/// Renders the posted CV as a PDF attachment.
pub async fn handle_export(
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload?;

    let pdf = tokio::task::spawn_blocking(move || render_cv_pdf(&req.improved_cv))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF export worker failed: {e}")))?
        .map_err(|e| AppError::Internal(e.into()))?;
    info!(bytes = pdf.len(), "CV exported to PDF");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}
