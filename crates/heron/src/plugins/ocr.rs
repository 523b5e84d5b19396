//! OCR backend plugin trait.

use crate::plugins::Plugin;
use crate::plugins::registry::{OcrBackendRegistry, get_ocr_backend_registry};
use crate::{HeronError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Language used when none is requested.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Recognizes text in encoded images (PNG, JPEG, ...).
#[async_trait]
pub trait OcrBackend: Plugin {
    /// Run OCR over an encoded image and return the recognized text, untrimmed.
    async fn process_image(&self, image_bytes: &[u8], language: &str) -> Result<String>;

    fn supports_language(&self, lang: &str) -> bool;
}

fn with_registry<T>(mutate: impl FnOnce(&mut OcrBackendRegistry) -> Result<T>) -> Result<T> {
    let registry = get_ocr_backend_registry();
    let mut registry = registry
        .write()
        .map_err(|e| HeronError::LockPoisoned(format!("OCR backend registry: {}", e)))?;
    mutate(&mut registry)
}

/// Add a backend after the ones already registered; image extraction uses the first
/// backend that supports the requested language.
pub fn register_ocr_backend(backend: Arc<dyn OcrBackend>) -> Result<()> {
    with_registry(|registry| registry.register(backend))
}

pub fn unregister_ocr_backend(name: &str) -> Result<()> {
    with_registry(|registry| registry.remove(name))
}

pub fn list_ocr_backends() -> Result<Vec<String>> {
    with_registry(|registry| Ok(registry.list()))
}
