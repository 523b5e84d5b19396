//! Word-processor extractor using docx-lite.
//!
//! Supports: Microsoft Word (.docx). Legacy `.doc` files are routed here as well and
//! fail with an extraction error, since they are not OOXML packages.

use crate::core::batch_mode::run_parser;
use crate::core::mime::{DOCX_MIME_TYPE, LEGACY_WORD_MIME_TYPE};
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::ExtractionResult;
use crate::{HeronError, Result};
use async_trait::async_trait;
use std::io::Cursor;

pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DocxExtractor {
    fn name(&self) -> &str {
        "docx-extractor"
    }

    fn description(&self) -> &str {
        "Paragraph text extraction from DOCX documents using docx-lite"
    }
}

/// Paragraph texts in document order, one per line, trimmed.
pub fn extract_docx_text(content: &[u8]) -> Result<String> {
    let document = docx_lite::parse_document(Cursor::new(content))
        .map_err(|e| HeronError::extraction(format!("DOCX parsing failed: {}", e)))?;

    Ok(paragraphs_to_text(&document.paragraphs))
}

fn paragraphs_to_text(paragraphs: &[docx_lite::Paragraph]) -> String {
    let text = paragraphs
        .iter()
        .map(|paragraph| paragraph.to_text())
        .collect::<Vec<_>>()
        .join("\n");

    text.trim().to_string()
}

#[async_trait]
impl DocumentExtractor for DocxExtractor {
    async fn extract_bytes(&self, content: &[u8], mime_type: &str) -> Result<ExtractionResult> {
        let text = run_parser("DOCX extraction", content, extract_docx_text).await?;
        Ok(ExtractionResult::new(text, mime_type))
    }

    fn supported_mime_types(&self) -> &[&str] {
        &[DOCX_MIME_TYPE, LEGACY_WORD_MIME_TYPE]
    }
}
