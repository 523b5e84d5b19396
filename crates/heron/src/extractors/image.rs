//! Image extractor backed by the registered OCR backend.

use crate::core::mime::{JPEG_MIME_TYPE, PNG_MIME_TYPE};
use crate::plugins::registry::get_ocr_backend_registry;
use crate::plugins::{DEFAULT_OCR_LANGUAGE, DocumentExtractor, OcrBackend, Plugin};
use crate::types::ExtractionResult;
use crate::{HeronError, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub struct ImageExtractor {
    language: String,
}

impl ImageExtractor {
    pub fn new() -> Self {
        Self::with_language(DEFAULT_OCR_LANGUAGE)
    }

    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    fn backend(&self) -> Result<Arc<dyn OcrBackend>> {
        let registry = get_ocr_backend_registry();
        let registry = registry
            .read()
            .map_err(|e| HeronError::LockPoisoned(format!("OCR backend registry: {}", e)))?;
        registry.get_for_language(&self.language)
    }
}

impl Default for ImageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ImageExtractor {
    fn name(&self) -> &str {
        "image-extractor"
    }

    fn description(&self) -> &str {
        "Extracts text from PNG and JPEG images via OCR"
    }
}

#[async_trait]
impl DocumentExtractor for ImageExtractor {
    async fn extract_bytes(&self, content: &[u8], mime_type: &str) -> Result<ExtractionResult> {
        let backend = self.backend()?;
        tracing::debug!(backend = backend.name(), size = content.len(), "Running OCR on image");

        let text = backend.process_image(content, &self.language).await.map_err(|e| match e {
            HeronError::Io(_) | HeronError::MissingDependency(_) => e,
            other => HeronError::extraction_with_source("OCR failed", other),
        })?;

        Ok(ExtractionResult::new(text.trim(), mime_type))
    }

    fn supported_mime_types(&self) -> &[&str] {
        &[PNG_MIME_TYPE, JPEG_MIME_TYPE]
    }
}
