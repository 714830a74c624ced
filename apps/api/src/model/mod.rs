//! Model Client: the four operations the HTTP layer calls.
//!
//! Each operation builds its prompt, makes exactly one backend call and decodes the
//! answer into its typed contract. Every failure (rejected prompt, transport, shape)
//! becomes a `ModelRequestError`; callers only ever show its generic public message.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::llm_client::{GenerativeBackend, InlineImage, LlmError};
use crate::models::{ImprovedCv, JobMatchResult, ReviewResult};
use crate::prompts::builder::{
    build_job_match_prompt, build_review_prompt, build_rewrite_prompt, PromptError, RewriteInput,
};
use crate::prompts::schemas::{job_match_schema, review_schema, rewrite_schema};

const STRUCTURED_FAILURE_MESSAGE: &str = "Failed to process request with the AI model. \
    The model may be unavailable or the input was invalid.";
const IMAGE_FAILURE_MESSAGE: &str =
    "Failed to analyze image. Ensure the file is a supported format and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTask {
    Review,
    Rewrite,
    MatchJob,
    AnalyzeImage,
}

impl fmt::Display for ModelTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelTask::Review => "review",
            ModelTask::Rewrite => "rewrite",
            ModelTask::MatchJob => "job match",
            ModelTask::AnalyzeImage => "image analysis",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ModelFailure {
    #[error("prompt rejected: {0}")]
    Prompt(#[from] PromptError),

    #[error("backend call failed: {0}")]
    Backend(#[from] LlmError),

    #[error("response did not match the expected shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// A failed model operation. `Display` carries the full cause for logs.
#[derive(Debug, Error)]
#[error("{task} request failed: {cause}")]
pub struct ModelRequestError {
    pub task: ModelTask,
    #[source]
    pub cause: ModelFailure,
}

impl ModelRequestError {
    fn new(task: ModelTask, cause: impl Into<ModelFailure>) -> Self {
        Self {
            task,
            cause: cause.into(),
        }
    }

    /// The message safe to return to API callers.
    pub fn public_message(&self) -> &'static str {
        match self.task {
            ModelTask::AnalyzeImage => IMAGE_FAILURE_MESSAGE,
            _ => STRUCTURED_FAILURE_MESSAGE,
        }
    }
}

/// Explicitly constructed client handed to handlers through `AppState`.
#[derive(Clone)]
pub struct ModelClient {
    backend: Arc<dyn GenerativeBackend>,
}

impl ModelClient {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    pub async fn review(
        &self,
        cv_text: &str,
        language: Option<&str>,
    ) -> Result<ReviewResult, ModelRequestError> {
        let prompt = build_review_prompt(cv_text, language);
        self.structured(ModelTask::Review, prompt, &review_schema())
            .await
    }

    pub async fn rewrite(&self, input: RewriteInput<'_>) -> Result<ImprovedCv, ModelRequestError> {
        let prompt = build_rewrite_prompt(&input);
        self.structured(ModelTask::Rewrite, prompt, &rewrite_schema())
            .await
    }

    pub async fn match_job(
        &self,
        cv_text: &str,
        job_description: &str,
    ) -> Result<JobMatchResult, ModelRequestError> {
        let prompt = build_job_match_prompt(cv_text, job_description);
        self.structured(ModelTask::MatchJob, prompt, &job_match_schema())
            .await
    }

    /// Free-text answer about an image. No schema is requested.
    pub async fn analyze_image(
        &self,
        prompt: &str,
        image: &InlineImage,
    ) -> Result<String, ModelRequestError> {
        let text = self
            .backend
            .generate_with_image(prompt, image)
            .await
            .map_err(|e| ModelRequestError::new(ModelTask::AnalyzeImage, e))?;
        info!(
            mime_type = %image.mime_type,
            bytes = image.data.len(),
            "Image analysis completed"
        );
        Ok(text)
    }

    async fn structured<T: DeserializeOwned>(
        &self,
        task: ModelTask,
        prompt: Result<String, PromptError>,
        schema: &Value,
    ) -> Result<T, ModelRequestError> {
        let prompt = prompt.map_err(|e| ModelRequestError::new(task, e))?;
        let raw = self
            .backend
            .generate_json(&prompt, schema)
            .await
            .map_err(|e| ModelRequestError::new(task, e))?;
        let decoded = serde_json::from_str(raw.trim()).map_err(|e| ModelRequestError::new(task, e))?;
        info!(%task, "Model response decoded");
        Ok(decoded)
    }
}


#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::testing::{FakeBackend, IMPROVED_CV_JSON, JOB_MATCH_JSON, REVIEW_JSON};
    use super::*;

    fn client(backend: &Arc<FakeBackend>) -> ModelClient {
        ModelClient::new(backend.clone())
    }

    #[tokio::test]
    async fn test_review_decodes_typed_result() {
        let backend = Arc::new(FakeBackend::replying(REVIEW_JSON));
        let review = client(&backend)
            .review("Jane Doe, Rust developer", Some("en"))
            .await
            .unwrap();
        assert_eq!(review.score.value(), 72);
        assert_eq!(review.section_feedback.projects.len(), 1);
        assert_eq!(backend.calls(), 1);
        assert!(backend.last_prompt().unwrap().contains("Jane Doe, Rust developer"));
    }

    #[tokio::test]
    async fn test_delimiter_rejected_without_backend_call() {
        let backend = Arc::new(FakeBackend::replying(REVIEW_JSON));
        let client = client(&backend);

        let review = client.review("a --- b", None).await.unwrap_err();
        assert!(matches!(review.cause, ModelFailure::Prompt(_)));

        let rewrite = client
            .rewrite(RewriteInput {
                cv_text: "ok",
                job_description: Some("x---y"),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(rewrite.task, ModelTask::Rewrite);

        let matched = client.match_job("ok", "---").await.unwrap_err();
        assert_eq!(matched.task, ModelTask::MatchJob);

        assert_eq!(backend.calls(), 0, "no prompt containing the delimiter may reach the model");
    }

    #[tokio::test]
    async fn test_missing_required_key_is_shape_failure() {
        let backend = Arc::new(FakeBackend::replying(
            r#"{"score": 50, "overallSummary": "x", "strengths": [], "weaknesses": []}"#,
        ));
        let err = client(&backend).review("cv", None).await.unwrap_err();
        assert!(matches!(err.cause, ModelFailure::Shape(_)));
        assert_eq!(err.public_message(), STRUCTURED_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_malformed_json_is_shape_failure() {
        let backend = Arc::new(FakeBackend::replying("not json at all"));
        let err = client(&backend).match_job("cv", "jd").await.unwrap_err();
        assert!(matches!(err.cause, ModelFailure::Shape(_)));
    }

    #[tokio::test]
    async fn test_null_required_field_in_rewrite_rejected() {
        let backend = Arc::new(FakeBackend::replying(
            r#"{"header": {"fullName": null, "email": ""}, "summary": "", "skills": [],
                "experience": [], "education": [], "projects": []}"#,
        ));
        let err = client(&backend)
            .rewrite(RewriteInput {
                cv_text: "cv",
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err.cause, ModelFailure::Shape(_)));
    }

    #[tokio::test]
    async fn test_rewrite_and_match_decode() {
        let backend = Arc::new(FakeBackend::replying(IMPROVED_CV_JSON));
        let cv = client(&backend)
            .rewrite(RewriteInput {
                cv_text: "cv",
                target_role: Some("Backend Intern"),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(cv.header.full_name, "Jane Doe");
        assert!(backend
            .last_prompt()
            .unwrap()
            .contains("- Target Role: Backend Intern"));

        let backend = Arc::new(FakeBackend::replying(JOB_MATCH_JSON));
        let matched = client(&backend).match_job("cv", "jd").await.unwrap();
        assert_eq!(matched.fit_score.value(), 58);
    }

    #[tokio::test]
    async fn test_backend_failure_hides_provider_detail() {
        let backend = Arc::new(FakeBackend::failing());
        let err = client(&backend).review("cv", None).await.unwrap_err();
        assert!(matches!(err.cause, ModelFailure::Backend(_)));
        assert!(!err.public_message().contains("overloaded"));
        assert!(err.to_string().contains("overloaded"), "full cause kept for logs");
    }

    #[tokio::test]
    async fn test_analyze_image_returns_free_text() {
        let backend = Arc::new(FakeBackend::replying("A bar chart of monthly sales."));
        let image = InlineImage {
            mime_type: "image/png".to_string(),
            data: Bytes::from_static(&[0x89, b'P', b'N', b'G']),
        };
        let text = client(&backend)
            .analyze_image("What is shown?", &image)
            .await
            .unwrap();
        assert_eq!(text, "A bar chart of monthly sales.");

        let failing = Arc::new(FakeBackend::failing());
        let err = client(&failing)
            .analyze_image("What is shown?", &image)
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), IMAGE_FAILURE_MESSAGE);
    }
}
