//! Process-wide plugin registries.
//!
//! Both registries keep plugins by name in registration order. Extractor lookup by
//! MIME type prefers an exact entry over an `image/*` style wildcard and, within the
//! same kind of match, the highest priority; equal priorities go to the plugin
//! registered last. OCR backends are tried in registration order.

use crate::plugins::{DocumentExtractor, OcrBackend, Plugin};
use crate::{HeronError, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

/// Plugin names must be non-empty and free of whitespace.
fn checked_name(plugin: &dyn Plugin) -> Result<String> {
    let name = plugin.name();
    if name.is_empty() {
        return Err(HeronError::validation("Plugin name cannot be empty"));
    }
    if name.contains(char::is_whitespace) {
        return Err(HeronError::validation(format!(
            "Plugin name '{}' cannot contain whitespace",
            name
        )));
    }
    Ok(name.to_string())
}

/// How well a registered MIME pattern covers a requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MimeMatch {
    Wildcard,
    Exact,
}

fn match_mime(pattern: &str, mime_type: &str) -> Option<MimeMatch> {
    if pattern == mime_type {
        return Some(MimeMatch::Exact);
    }
    let prefix = pattern.strip_suffix('*')?;
    (prefix.ends_with('/') && mime_type.starts_with(prefix)).then_some(MimeMatch::Wildcard)
}

pub struct OcrBackendRegistry {
    backends: IndexMap<String, Arc<dyn OcrBackend>>,
}

impl OcrBackendRegistry {
    /// Registry holding the Tesseract backend when the `ocr` feature is on and the
    /// engine can be located; empty otherwise.
    pub fn new() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::new_empty();

        #[cfg(feature = "ocr")]
        match crate::ocr::TesseractBackend::new() {
            Ok(backend) => {
                if let Err(e) = registry.register(Arc::new(backend)) {
                    tracing::warn!(error = %e, "Failed to register Tesseract backend");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Tesseract backend unavailable"),
        }

        registry
    }

    pub fn new_empty() -> Self {
        Self {
            backends: IndexMap::new(),
        }
    }

    pub fn register(&mut self, backend: Arc<dyn OcrBackend>) -> Result<()> {
        let name = checked_name(backend.as_ref())?;
        backend.initialize()?;
        self.backends.insert(name, backend);
        Ok(())
    }

    /// First registered backend that supports `language`.
    ///
    /// # Errors
    ///
    /// `MissingDependency` when no backend can serve the language.
    pub fn get_for_language(&self, language: &str) -> Result<Arc<dyn OcrBackend>> {
        self.backends
            .values()
            .find(|backend| backend.supports_language(language))
            .cloned()
            .ok_or_else(|| {
                HeronError::MissingDependency(format!("No OCR backend available for language '{}'", language))
            })
    }

    pub fn list(&self) -> Vec<String> {
        self.backends.keys().cloned().collect()
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        match self.backends.shift_remove(name) {
            Some(backend) => backend.shutdown(),
            None => Ok(()),
        }
    }
}

impl Default for OcrBackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub struct DocumentExtractorRegistry {
    extractors: IndexMap<String, Arc<dyn DocumentExtractor>>,
}

impl DocumentExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `extractor`, replacing any extractor registered under the same name.
    pub fn register(&mut self, extractor: Arc<dyn DocumentExtractor>) -> Result<()> {
        let name = checked_name(extractor.as_ref())?;
        extractor.initialize()?;

        if let Some(previous) = self.extractors.shift_remove(&name)
            && let Err(e) = previous.shutdown()
        {
            tracing::warn!(extractor = %name, error = %e, "Replaced extractor failed to shut down");
        }

        tracing::debug!(
            extractor = %name,
            priority = extractor.priority(),
            mime_types = ?extractor.supported_mime_types(),
            "Registered document extractor"
        );
        self.extractors.insert(name, extractor);
        Ok(())
    }

    /// Extractor for `mime_type`.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` when no registered extractor covers the type.
    pub fn get(&self, mime_type: &str) -> Result<Arc<dyn DocumentExtractor>> {
        self.extractors
            .values()
            .filter_map(|extractor| {
                extractor
                    .supported_mime_types()
                    .iter()
                    .filter_map(|pattern| match_mime(pattern, mime_type))
                    .max()
                    .map(|kind| ((kind, extractor.priority()), extractor))
            })
            .max_by_key(|(rank, _)| *rank)
            .map(|(_, extractor)| Arc::clone(extractor))
            .ok_or_else(|| HeronError::UnsupportedFormat(mime_type.to_string()))
    }

    pub fn list(&self) -> Vec<String> {
        self.extractors.keys().cloned().collect()
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        match self.extractors.shift_remove(name) {
            Some(extractor) => extractor.shutdown(),
            None => Ok(()),
        }
    }

    /// Remove every extractor, stopping at the first shutdown failure.
    pub fn shutdown_all(&mut self) -> Result<()> {
        while let Some((_, extractor)) = self.extractors.shift_remove_index(0) {
            extractor.shutdown()?;
        }
        Ok(())
    }
}

static OCR_BACKENDS: Lazy<Arc<RwLock<OcrBackendRegistry>>> =
    Lazy::new(|| Arc::new(RwLock::new(OcrBackendRegistry::new())));

static DOCUMENT_EXTRACTORS: Lazy<Arc<RwLock<DocumentExtractorRegistry>>> =
    Lazy::new(|| Arc::new(RwLock::new(DocumentExtractorRegistry::new())));

pub fn get_ocr_backend_registry() -> Arc<RwLock<OcrBackendRegistry>> {
    Arc::clone(&OCR_BACKENDS)
}

pub fn get_document_extractor_registry() -> Arc<RwLock<DocumentExtractorRegistry>> {
    Arc::clone(&DOCUMENT_EXTRACTORS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::Plugin;
    use crate::types::ExtractionResult;
    use async_trait::async_trait;

    struct NamedExtractor {
        name: &'static str,
        mime_types: &'static [&'static str],
        priority: i32,
    }

    impl Plugin for NamedExtractor {
        fn name(&self) -> &str {
            self.name
        }
    }

    #[async_trait]
    impl DocumentExtractor for NamedExtractor {
        async fn extract_bytes(&self, _content: &[u8], mime_type: &str) -> Result<ExtractionResult> {
            Ok(ExtractionResult::new(self.name, mime_type))
        }

        fn supported_mime_types(&self) -> &[&str] {
            self.mime_types
        }

        fn priority(&self) -> i32 {
            self.priority
        }
    }

    #[test]
    fn test_highest_priority_wins() {
        let mut registry = DocumentExtractorRegistry::new();
        registry
            .register(Arc::new(NamedExtractor {
                name: "low",
                mime_types: &["text/plain"],
                priority: 10,
            }))
            .unwrap();
        registry
            .register(Arc::new(NamedExtractor {
                name: "high",
                mime_types: &["text/plain"],
                priority: 90,
            }))
            .unwrap();

        assert_eq!(registry.get("text/plain").unwrap().name(), "high");
    }

    #[test]
    fn test_wildcard_fallback() {
        let mut registry = DocumentExtractorRegistry::new();
        registry
            .register(Arc::new(NamedExtractor {
                name: "any-image",
                mime_types: &["image/*"],
                priority: 50,
            }))
            .unwrap();

        assert_eq!(registry.get("image/png").unwrap().name(), "any-image");
        assert!(matches!(
            registry.get("application/pdf"),
            Err(HeronError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_remove_clears_mime_entries() {
        let mut registry = DocumentExtractorRegistry::new();
        registry
            .register(Arc::new(NamedExtractor {
                name: "csv",
                mime_types: &["text/csv", "text/plain"],
                priority: 50,
            }))
            .unwrap();

        registry.remove("csv").unwrap();
        assert!(registry.list().is_empty());
        assert!(registry.get("text/csv").is_err());
    }

    #[test]
    fn test_exact_match_beats_wildcard() {
        let mut registry = DocumentExtractorRegistry::new();
        registry
            .register(Arc::new(NamedExtractor {
                name: "any-image",
                mime_types: &["image/*"],
                priority: 90,
            }))
            .unwrap();
        registry
            .register(Arc::new(NamedExtractor {
                name: "png-only",
                mime_types: &["image/png"],
                priority: 10,
            }))
            .unwrap();

        assert_eq!(registry.get("image/png").unwrap().name(), "png-only");
        assert_eq!(registry.get("image/jpeg").unwrap().name(), "any-image");
    }

    #[test]
    fn test_reregistering_name_replaces() {
        let mut registry = DocumentExtractorRegistry::new();
        for priority in [10, 20] {
            registry
                .register(Arc::new(NamedExtractor {
                    name: "text",
                    mime_types: &["text/plain"],
                    priority,
                }))
                .unwrap();
        }

        assert_eq!(registry.list(), vec!["text"]);
        assert_eq!(registry.get("text/plain").unwrap().priority(), 20);
    }

    #[test]
    fn test_invalid_plugin_names_rejected() {
        let mut registry = DocumentExtractorRegistry::new();
        let result = registry.register(Arc::new(NamedExtractor {
            name: "has space",
            mime_types: &["text/plain"],
            priority: 50,
        }));
        assert!(matches!(result, Err(HeronError::Validation { .. })));
    }

    #[test]
    fn test_empty_ocr_registry_reports_missing_dependency() {
        let registry = OcrBackendRegistry::new_empty();
        assert!(matches!(
            registry.get_for_language("eng"),
            Err(HeronError::MissingDependency(_))
        ));
        assert!(registry.list().is_empty());
    }
}
