//! OCR backends.

mod tesseract;

pub use tesseract::{TesseractBackend, resolve_tessdata_path};
