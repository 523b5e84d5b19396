//! API request and response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::classifiers::CompositeClassifier;
use crate::core::config::ClassifierConfig;
use crate::store::{InMemoryResultStore, ResultStore};
use crate::types::ClassifierResult;
use crate::Result;

/// Request body limits for the router.
///
/// These bound the raw HTTP body; the per-file limit from
/// [`UploadConfig`](crate::core::config::UploadConfig) is checked separately so that
/// oversized files get a 400 with a readable message.
#[derive(Debug, Clone, Copy)]
pub struct ApiSizeLimits {
    /// Maximum size of the entire request body in bytes.
    pub max_request_body_bytes: usize,
}

impl Default for ApiSizeLimits {
    fn default() -> Self {
        Self {
            max_request_body_bytes: 100 * 1024 * 1024,
        }
    }
}

impl ApiSizeLimits {
    pub fn new(max_request_body_bytes: usize) -> Self {
        Self { max_request_body_bytes }
    }

    pub fn from_mb(max_request_body_mb: usize) -> Self {
        Self {
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Classification of one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    /// Id under which the result was stored.
    pub id: Uuid,
    pub filename: String,
    #[serde(flatten)]
    pub result: ClassifierResult,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type name
    pub error_type: String,
    /// Error message
    pub message: String,
    /// HTTP status code
    pub status_code: u16,
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<ClassifierConfig>,
    pub classifier: Arc<CompositeClassifier>,
    pub store: Arc<dyn ResultStore>,
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("classifier", &self.classifier)
            .field("stored_results", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl ApiState {
    /// Build the classifier chain from `config` with an in-memory result store.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let classifier = CompositeClassifier::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            classifier: Arc::new(classifier),
            store: Arc::new(InMemoryResultStore::new()),
        })
    }

    pub fn with_store(mut self, store: Arc<dyn ResultStore>) -> Self {
        self.store = store;
        self
    }
}
