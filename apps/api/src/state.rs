use std::sync::Arc;

use crate::config::Config;
use crate::extract::TextExtractor;
use crate::model::ModelClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub model: ModelClient,
    /// Pluggable document reader. Default: `FileTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
    pub config: Config,
}
