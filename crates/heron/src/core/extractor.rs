//! Document-to-text extraction.
//!
//! [`extract_text`] selects the MIME type for a [`Document`], looks up the registered
//! extractor, and runs it over the document's bytes. The stream is back at position 0
//! when it returns, whether extraction succeeded or not. Failures never escape as
//! anything but a `HeronError`; strategies decide what to do with them.

use crate::core::document::Document;
use crate::core::mime::select_mime_type;
use crate::plugins::DocumentExtractor;
use crate::plugins::registry::get_document_extractor_registry;
use crate::types::ExtractionResult;
use crate::{HeronError, Result};
use std::sync::Arc;

/// Extractor that would handle `document`, without running it.
///
/// # Errors
///
/// `UnsupportedFormat` for unknown extensions or formats with no registered extractor.
pub fn select_extractor(document: &mut Document) -> Result<(Arc<dyn DocumentExtractor>, String)> {
    crate::extractors::ensure_initialized()?;

    let mime_type = select_mime_type(document)?;

    let registry = get_document_extractor_registry();
    let registry = registry
        .read()
        .map_err(|e| HeronError::LockPoisoned(format!("Document extractor registry: {}", e)))?;
    let extractor = registry.get(&mime_type)?;

    Ok((extractor, mime_type))
}

/// Extract plain text from `document`.
pub async fn extract_text(document: &mut Document) -> Result<ExtractionResult> {
    let result = extract_inner(document).await;
    let rewound = document.rewind();

    let extraction = result?;
    rewound?;
    Ok(extraction)
}

async fn extract_inner(document: &mut Document) -> Result<ExtractionResult> {
    let (extractor, mime_type) = select_extractor(document)?;
    let content = document.read_all()?;

    tracing::debug!(
        filename = document.filename(),
        extractor = extractor.name(),
        mime_type = %mime_type,
        size = content.len(),
        "Extracting text"
    );

    extractor.extract_bytes(&content, &mime_type).await
}
