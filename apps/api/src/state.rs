use std::sync::Arc;

use crate::config::Config;
use crate::extraction::{DocumentTextExtractor, TextExtractor};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The analysis engine is a pure function and needs no slot here.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable text extractor. Default: DocumentTextExtractor (PDF + DOCX).
    pub extractor: Arc<dyn TextExtractor>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            extractor: Arc::new(DocumentTextExtractor),
        }
    }
}
