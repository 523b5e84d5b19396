//! Plugin system.
//!
//! Text extraction is pluggable: every format is handled by a [`DocumentExtractor`]
//! registered for one or more MIME types, and image extraction delegates to an
//! [`OcrBackend`]. Built-in extractors are registered on first use; callers may add
//! their own (for example a higher-priority PDF extractor) at any time.

mod extractor;
mod ocr;
pub mod registry;
mod traits;

pub use extractor::{DocumentExtractor, clear_extractors, list_extractors, register_extractor, unregister_extractor};
pub use ocr::{DEFAULT_OCR_LANGUAGE, OcrBackend, list_ocr_backends, register_ocr_backend, unregister_ocr_backend};
pub use traits::Plugin;
