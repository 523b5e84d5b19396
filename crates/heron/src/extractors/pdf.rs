//! PDF extractor using lopdf.
//!
//! Text is pulled page by page. A page whose content stream cannot be decoded is
//! logged and skipped; the document only fails when no page yields any text.

use crate::core::batch_mode::run_parser;
use crate::core::mime::PDF_MIME_TYPE;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::ExtractionResult;
use crate::{HeronError, Result};
use async_trait::async_trait;

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extractor"
    }
}

/// Load a PDF and extract the text of every page it can.
pub fn extract_pdf_text(content: &[u8]) -> Result<String> {
    let document = lopdf::Document::load_mem(content)?;

    let pages = document
        .get_pages()
        .into_keys()
        .map(|page_number| (page_number, document.extract_text(&[page_number]).map_err(HeronError::from)));

    collect_page_texts(pages)
}

/// Join per-page results with "\n", skipping failed pages.
///
/// # Errors
///
/// `Extraction` when the trimmed result is empty.
pub fn collect_page_texts<I>(pages: I) -> Result<String>
where
    I: IntoIterator<Item = (u32, Result<String>)>,
{
    let mut texts = Vec::new();

    for (page_number, page_result) in pages {
        match page_result {
            Ok(text) if !text.trim().is_empty() => texts.push(text),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "Skipping PDF page that failed to extract");
            }
        }
    }

    let joined = texts.join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        return Err(HeronError::extraction("No text could be extracted from the PDF"));
    }

    Ok(trimmed.to_string())
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_bytes(&self, content: &[u8], mime_type: &str) -> Result<ExtractionResult> {
        let text = run_parser("PDF extraction", content, extract_pdf_text).await?;
        Ok(ExtractionResult::new(text, mime_type))
    }

    fn supported_mime_types(&self) -> &[&str] {
        &[PDF_MIME_TYPE]
    }
}
