//! Plain text and CSV extractor.

use crate::core::mime::{CSV_MIME_TYPE, PLAIN_TEXT_MIME_TYPE};
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::ExtractionResult;
use crate::{HeronError, Result};
use async_trait::async_trait;

/// Decodes UTF-8 content; CSV is treated as text.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain-text-extractor"
    }
}

#[async_trait]
impl DocumentExtractor for PlainTextExtractor {
    async fn extract_bytes(&self, content: &[u8], mime_type: &str) -> Result<ExtractionResult> {
        let text = std::str::from_utf8(content)
            .map_err(|e| HeronError::extraction_with_source(format!("Invalid UTF-8 text: {}", e), e))?;

        Ok(ExtractionResult::new(text.trim(), mime_type))
    }

    fn supported_mime_types(&self) -> &[&str] {
        &[PLAIN_TEXT_MIME_TYPE, CSV_MIME_TYPE]
    }
}
