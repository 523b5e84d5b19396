use super::Classifier;
use crate::core::config::ClassifierConfig;
use crate::core::document::Document;
use crate::core::extractor::extract_text;
use crate::types::REGEX_CLASSIFIER;
use crate::{HeronError, Result};
use async_trait::async_trait;
use regex::{Regex, RegexBuilder};

/// Case-insensitive pattern matching over the extracted text.
///
/// Types are tried in configuration order; the first type with any matching pattern
/// wins. Documents whose text cannot be extracted are reported as unknown.
#[derive(Debug, Clone)]
pub struct RegexClassifier {
    patterns: Vec<(String, Vec<Regex>)>,
}

impl RegexClassifier {
    /// Compile `patterns` for each type.
    ///
    /// # Errors
    ///
    /// `Validation` if any pattern fails to compile.
    pub fn new(patterns: Vec<(String, Vec<String>)>) -> Result<Self> {
        let patterns = patterns
            .into_iter()
            .map(|(name, sources)| {
                let compiled = sources
                    .iter()
                    .map(|source| {
                        RegexBuilder::new(source).case_insensitive(true).build().map_err(|e| {
                            HeronError::validation_with_source(format!("Invalid regex for '{}': {}", name, source), e)
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((name, compiled))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        Self::new(
            config
                .document_types
                .iter()
                .map(|t| (t.name.clone(), t.regex_patterns.clone()))
                .collect(),
        )
    }

    /// First type with a pattern matching `text`.
    pub fn match_text(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.patterns
            .iter()
            .find(|(_, regexes)| regexes.iter().any(|regex| regex.is_match(&lowered)))
            .map(|(name, _)| name.as_str())
    }
}

#[async_trait]
impl Classifier for RegexClassifier {
    fn name(&self) -> &str {
        REGEX_CLASSIFIER
    }

    async fn detect(&self, document: &mut Document) -> Result<Option<String>> {
        let extraction = extract_text(document).await?;
        Ok(self.match_text(&extraction.content).map(str::to_string))
    }
}
