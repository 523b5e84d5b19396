//! Built-in document extractors.
//!
//! | Format          | Extractor            | Feature  |
//! |-----------------|----------------------|----------|
//! | PDF             | [`PdfExtractor`]     | `pdf`    |
//! | DOCX / DOC      | [`DocxExtractor`]    | `office` |
//! | XLSX / XLS      | [`ExcelExtractor`]   | `excel`  |
//! | PNG / JPEG      | [`ImageExtractor`]   | always (needs an OCR backend) |
//! | TXT / CSV       | [`PlainTextExtractor`] | always |

use crate::plugins::DocumentExtractor;
use crate::plugins::registry::get_document_extractor_registry;
use crate::{HeronError, Result};
use once_cell::sync::OnceCell;
use std::sync::Arc;

pub mod image;
pub mod text;

#[cfg(feature = "office")]
pub mod docx;

#[cfg(feature = "excel")]
pub mod excel;

#[cfg(feature = "pdf")]
pub mod pdf;

pub use image::ImageExtractor;
pub use text::PlainTextExtractor;

#[cfg(feature = "office")]
pub use docx::DocxExtractor;

#[cfg(feature = "excel")]
pub use excel::ExcelExtractor;

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

static FIRST_REGISTRATION: OnceCell<()> = OnceCell::new();

/// One instance of every extractor compiled into this build.
fn builtin_extractors() -> Vec<Arc<dyn DocumentExtractor>> {
    #[allow(unused_mut)]
    let mut extractors: Vec<Arc<dyn DocumentExtractor>> =
        vec![Arc::new(PlainTextExtractor::new()), Arc::new(ImageExtractor::new())];

    #[cfg(feature = "pdf")]
    extractors.push(Arc::new(PdfExtractor::new()));

    #[cfg(feature = "excel")]
    extractors.push(Arc::new(ExcelExtractor::new()));

    #[cfg(feature = "office")]
    extractors.push(Arc::new(DocxExtractor::new()));

    extractors
}

/// Make sure the built-in extractors are registered.
///
/// The first call registers them. Later calls register them again only if the
/// registry has been emptied in the meantime, e.g. by
/// [`clear_extractors`](crate::plugins::clear_extractors).
pub fn ensure_initialized() -> Result<()> {
    FIRST_REGISTRATION.get_or_try_init(register_default_extractors)?;

    let registry_is_empty = get_document_extractor_registry()
        .read()
        .map_err(|e| HeronError::LockPoisoned(format!("Document extractor registry: {}", e)))?
        .list()
        .is_empty();

    if registry_is_empty {
        tracing::debug!("Extractor registry was cleared; registering built-ins again");
        register_default_extractors()?;
    }

    Ok(())
}

/// Register every built-in extractor with the global registry.
pub fn register_default_extractors() -> Result<()> {
    let registry = get_document_extractor_registry();
    let mut registry = registry
        .write()
        .map_err(|e| HeronError::LockPoisoned(format!("Document extractor registry: {}", e)))?;

    for extractor in builtin_extractors() {
        let name = extractor.name().to_string();
        registry.register(extractor).map_err(|e| HeronError::Plugin {
            message: format!("Failed to register built-in extractor: {}", e),
            plugin_name: name,
        })?;
    }

    Ok(())
}
