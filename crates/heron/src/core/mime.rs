//! Format selection from filename extension and content sniffing.
//!
//! The extension decides the candidate format. The first [`SNIFF_WINDOW`] bytes are then
//! inspected: a recognised signature that maps to a supported format wins, except that
//! images keep whatever the extension said. Unmapped or failed sniffs fall back to the
//! extension.

use crate::core::document::Document;
use crate::{HeronError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const LEGACY_WORD_MIME_TYPE: &str = "application/msword";
pub const EXCEL_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXCEL_BINARY_MIME_TYPE: &str = "application/vnd.ms-excel";
pub const PNG_MIME_TYPE: &str = "image/png";
pub const JPEG_MIME_TYPE: &str = "image/jpeg";
pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Number of leading bytes inspected when sniffing content.
pub const SNIFF_WINDOW: usize = 2048;

/// Broad document family an extractor is chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pdf,
    WordProcessor,
    Spreadsheet,
    Image,
    PlainText,
}

static EXT_TO_MIME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("pdf", PDF_MIME_TYPE);

    m.insert("docx", DOCX_MIME_TYPE);
    m.insert("doc", LEGACY_WORD_MIME_TYPE);

    m.insert("xlsx", EXCEL_MIME_TYPE);
    m.insert("xls", EXCEL_BINARY_MIME_TYPE);

    m.insert("png", PNG_MIME_TYPE);
    m.insert("jpg", JPEG_MIME_TYPE);
    m.insert("jpeg", JPEG_MIME_TYPE);

    m.insert("txt", PLAIN_TEXT_MIME_TYPE);
    m.insert("csv", CSV_MIME_TYPE);

    m
});

/// Format of a MIME type from the supported set, if any.
///
/// Images are not part of the sniff map; they are only ever chosen by extension.
pub fn format_of(mime_type: &str) -> Option<DocumentFormat> {
    match mime_type {
        PDF_MIME_TYPE => Some(DocumentFormat::Pdf),
        DOCX_MIME_TYPE | LEGACY_WORD_MIME_TYPE => Some(DocumentFormat::WordProcessor),
        EXCEL_MIME_TYPE | EXCEL_BINARY_MIME_TYPE => Some(DocumentFormat::Spreadsheet),
        PLAIN_TEXT_MIME_TYPE | CSV_MIME_TYPE => Some(DocumentFormat::PlainText),
        m if m.starts_with("image/") => Some(DocumentFormat::Image),
        _ => None,
    }
}

/// MIME type implied by the filename's extension (case-insensitive).
///
/// # Errors
///
/// `UnsupportedFormat` when the filename has no extension or an unknown one.
pub fn mime_from_extension(filename: &str) -> Result<&'static str> {
    let (_, extension) = filename
        .rsplit_once('.')
        .ok_or_else(|| HeronError::UnsupportedFormat(format!("File must have a valid extension: {}", filename)))?;

    EXT_TO_MIME
        .get(extension.to_lowercase().as_str())
        .copied()
        .ok_or_else(|| HeronError::UnsupportedFormat(format!("Unsupported file extension: {}", extension)))
}

/// Best-effort content sniff of a leading byte window.
///
/// Returns the detected MIME type, `text/plain` for signature-less valid UTF-8 without
/// NUL bytes, or `None` when nothing can be said.
pub fn sniff_mime_type(window: &[u8]) -> Option<String> {
    if window.is_empty() {
        return None;
    }

    if let Some(kind) = infer::get(window) {
        return Some(kind.mime_type().to_string());
    }

    if looks_like_text(window) {
        return Some(PLAIN_TEXT_MIME_TYPE.to_string());
    }

    None
}

/// The window may cut a multi-byte character at its end; that still counts as UTF-8.
fn looks_like_text(window: &[u8]) -> bool {
    if window.contains(&0) {
        return false;
    }

    match std::str::from_utf8(window) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

/// Combine the extension's MIME type with a sniff result.
pub fn resolve_mime_type(extension_mime: &'static str, sniffed: Option<&str>) -> String {
    let Some(sniffed) = sniffed else {
        return extension_mime.to_string();
    };

    match format_of(sniffed) {
        Some(DocumentFormat::Image) => extension_mime.to_string(),
        Some(_) if EXT_TO_MIME.values().any(|m| *m == sniffed) => sniffed.to_string(),
        _ => {
            tracing::debug!(
                sniffed = sniffed,
                fallback = extension_mime,
                "Sniffed MIME type is not supported, using extension"
            );
            extension_mime.to_string()
        }
    }
}

/// Select the MIME type an extractor is looked up by.
///
/// The stream is left at position 0. Sniffing failures are logged and ignored.
pub fn select_mime_type(document: &mut Document) -> Result<String> {
    let extension_mime = mime_from_extension(document.filename())?;

    let sniffed = match document.peek(SNIFF_WINDOW) {
        Ok(window) => sniff_mime_type(&window),
        Err(e) => {
            tracing::warn!(filename = document.filename(), error = %e, "Content sniffing failed, using extension");
            None
        }
    };

    let mime_type = resolve_mime_type(extension_mime, sniffed.as_deref());
    tracing::debug!(
        filename = document.filename(),
        extension_mime,
        sniffed = sniffed.as_deref().unwrap_or("none"),
        selected = %mime_type,
        "Selected extractor MIME type"
    );

    Ok(mime_type)
}
