use super::Classifier;
use crate::Result;
use crate::core::config::ClassifierConfig;
use crate::core::document::Document;
use crate::types::FILENAME_CLASSIFIER;
use async_trait::async_trait;

/// Matches filename keywords as substrings of the lower-cased filename.
///
/// Document types are tried in configuration order; the first with any matching
/// keyword wins. The document content is never read.
#[derive(Debug, Clone)]
pub struct FilenameClassifier {
    keywords: Vec<(String, Vec<String>)>,
}

impl FilenameClassifier {
    pub fn new(keywords: Vec<(String, Vec<String>)>) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|(name, words)| (name, words.into_iter().map(|w| w.to_lowercase()).collect()))
            .collect();
        Self { keywords }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(
            config
                .document_types
                .iter()
                .map(|t| (t.name.clone(), t.filename_keywords.clone()))
                .collect(),
        )
    }

    fn match_filename(&self, filename: &str) -> Option<&str> {
        if filename.is_empty() {
            return None;
        }

        self.keywords
            .iter()
            .find(|(_, words)| words.iter().any(|word| filename.contains(word.as_str())))
            .map(|(name, _)| name.as_str())
    }
}

#[async_trait]
impl Classifier for FilenameClassifier {
    fn name(&self) -> &str {
        FILENAME_CLASSIFIER
    }

    async fn detect(&self, document: &mut Document) -> Result<Option<String>> {
        let filename = document.normalized_filename();
        Ok(self.match_filename(&filename).map(str::to_string))
    }
}
