//! Classification strategies.
//!
//! Each strategy implements [`Classifier`]: it inspects a [`Document`] (its filename,
//! its extracted text, or both) and either names a configured document type or reports
//! "unknown". Strategies never return errors to their caller. Internal failures,
//! extraction failures included, pass through [`guarded`] and come out as "unknown"
//! attributed to the strategy.
//!
//! [`CompositeClassifier`] chains strategies and returns the first confident answer.

mod composite;
mod filename;
mod fuzzy;
mod regex;
mod tfidf;

pub use composite::CompositeClassifier;
pub use filename::FilenameClassifier;
pub use fuzzy::FuzzyClassifier;
pub use regex::RegexClassifier;
pub use tfidf::TfidfClassifier;

use crate::Result;
use crate::core::document::Document;
use crate::types::ClassifierResult;
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// A single document classification strategy.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Name reported in [`ClassifierResult::classifier_name`].
    fn name(&self) -> &str;

    /// Detect the document type.
    ///
    /// `Ok(None)` means no configured type matched with enough confidence. Errors are
    /// allowed here; [`classify`](Classifier::classify) absorbs them.
    async fn detect(&self, document: &mut Document) -> Result<Option<String>>;

    /// Build any lazily initialized state ahead of the first document.
    fn warm_up(&self) -> Result<()> {
        Ok(())
    }

    /// Classify `document`, never failing.
    async fn classify(&self, document: &mut Document) -> ClassifierResult {
        guarded(self.name(), self.detect(document)).await
    }
}

/// Run a detection and turn its outcome into a [`ClassifierResult`].
///
/// Errors and panics are logged and reported as "unknown" attributed to
/// `classifier_name`.
pub async fn guarded<F>(classifier_name: &str, detection: F) -> ClassifierResult
where
    F: Future<Output = Result<Option<String>>>,
{
    let outcome = match AssertUnwindSafe(detection).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => {
            tracing::error!(
                classifier = classifier_name,
                panic = panic_message(payload.as_ref()),
                "Classifier panicked"
            );
            return ClassifierResult::unknown(classifier_name);
        }
    };

    match outcome {
        Ok(Some(document_type)) => ClassifierResult::new(document_type, classifier_name),
        Ok(None) => {
            tracing::debug!(classifier = classifier_name, "No match");
            ClassifierResult::unknown(classifier_name)
        }
        Err(e) if e.is_extraction_failure() => {
            tracing::debug!(classifier = classifier_name, error = %e, "Content unavailable");
            ClassifierResult::unknown(classifier_name)
        }
        Err(e) => {
            tracing::warn!(classifier = classifier_name, error = %e, "Classifier failed");
            ClassifierResult::unknown(classifier_name)
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
