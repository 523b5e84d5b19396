//! Shared result types.

use serde::{Deserialize, Serialize};

/// Document type reported when no strategy reaches sufficient confidence.
pub const UNKNOWN_DOCUMENT_TYPE: &str = "unknown";

pub const FILENAME_CLASSIFIER: &str = "FilenameClassifier";
pub const FUZZY_CLASSIFIER: &str = "FuzzyClassifier";
pub const REGEX_CLASSIFIER: &str = "RegexClassifier";
pub const TFIDF_CLASSIFIER: &str = "TFIDFClassifier";
pub const COMPOSITE_CLASSIFIER: &str = "CompositeClassifier";

/// Outcome of a single classification attempt.
///
/// `document_type` is either one of the configured document types or exactly
/// [`UNKNOWN_DOCUMENT_TYPE`]. `classifier_name` always names the component that
/// produced the result, including when it produced "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierResult {
    #[serde(default = "default_document_type")]
    pub document_type: String,
    pub classifier_name: String,
}

fn default_document_type() -> String {
    UNKNOWN_DOCUMENT_TYPE.to_string()
}

impl ClassifierResult {
    pub fn new(document_type: impl Into<String>, classifier_name: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
            classifier_name: classifier_name.into(),
        }
    }

    /// An "unknown" result attributed to `classifier_name`.
    pub fn unknown(classifier_name: impl Into<String>) -> Self {
        Self::new(UNKNOWN_DOCUMENT_TYPE, classifier_name)
    }

    pub fn is_unknown(&self) -> bool {
        self.document_type == UNKNOWN_DOCUMENT_TYPE
    }

    /// Same document type, attributed to another component.
    pub fn relabeled(self, classifier_name: impl Into<String>) -> Self {
        Self {
            document_type: self.document_type,
            classifier_name: classifier_name.into(),
        }
    }
}

/// Plain text produced by an extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub content: String,
    /// MIME type the extractor was selected for.
    pub mime_type: String,
}

impl ExtractionResult {
    pub fn new(content: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            mime_type: mime_type.into(),
        }
    }
}
