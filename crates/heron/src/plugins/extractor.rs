//! Document extractor plugin trait.

use crate::plugins::Plugin;
use crate::plugins::registry::{DocumentExtractorRegistry, get_document_extractor_registry};
use crate::types::ExtractionResult;
use crate::{HeronError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Turns the raw bytes of one document format into plain text.
///
/// Extractors are registered per MIME type; when several claim the same type the one
/// with the highest [`priority`](DocumentExtractor::priority) is used.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use heron::plugins::{DocumentExtractor, Plugin};
/// use heron::types::ExtractionResult;
/// use heron::Result;
///
/// struct UpperCaseExtractor;
///
/// impl Plugin for UpperCaseExtractor {
///     fn name(&self) -> &str { "upper-case-extractor" }
/// }
///
/// #[async_trait]
/// impl DocumentExtractor for UpperCaseExtractor {
///     async fn extract_bytes(&self, content: &[u8], mime_type: &str) -> Result<ExtractionResult> {
///         let text = String::from_utf8_lossy(content).to_uppercase();
///         Ok(ExtractionResult::new(text, mime_type))
///     }
///
///     fn supported_mime_types(&self) -> &[&str] {
///         &["text/plain"]
///     }
/// }
/// ```
#[async_trait]
pub trait DocumentExtractor: Plugin {
    /// Extract text from a complete in-memory document.
    async fn extract_bytes(&self, content: &[u8], mime_type: &str) -> Result<ExtractionResult>;

    /// MIME types handled. `image/*` style wildcards are allowed.
    fn supported_mime_types(&self) -> &[&str];

    fn priority(&self) -> i32 {
        50
    }
}

fn with_registry<T>(mutate: impl FnOnce(&mut DocumentExtractorRegistry) -> Result<T>) -> Result<T> {
    let registry = get_document_extractor_registry();
    let mut registry = registry
        .write()
        .map_err(|e| HeronError::LockPoisoned(format!("Document extractor registry: {}", e)))?;
    mutate(&mut registry)
}

/// Add an extractor to the global registry, replacing one with the same name.
pub fn register_extractor(extractor: Arc<dyn DocumentExtractor>) -> Result<()> {
    with_registry(|registry| registry.register(extractor))
}

pub fn unregister_extractor(name: &str) -> Result<()> {
    with_registry(|registry| registry.remove(name))
}

/// Names of the registered extractors in registration order.
pub fn list_extractors() -> Result<Vec<String>> {
    with_registry(|registry| Ok(registry.list()))
}

/// Shut down and remove every extractor. The built-in set is registered again on
/// the next extraction.
pub fn clear_extractors() -> Result<()> {
    with_registry(|registry| registry.shutdown_all())
}
