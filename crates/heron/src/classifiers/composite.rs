use super::{Classifier, FilenameClassifier, FuzzyClassifier, RegexClassifier, TfidfClassifier, panic_message};
use crate::Result;
use crate::core::config::ClassifierConfig;
use crate::core::document::Document;
use crate::types::{COMPOSITE_CLASSIFIER, ClassifierResult};
use async_trait::async_trait;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Runs strategies in order and returns the first result that is not "unknown".
///
/// The winning result carries the winning strategy's name. A strategy that panics is
/// logged and skipped. When every strategy reports unknown the result is attributed to
/// `CompositeClassifier`.
pub struct CompositeClassifier {
    classifiers: Vec<Arc<dyn Classifier>>,
}

impl std::fmt::Debug for CompositeClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeClassifier")
            .field("classifiers", &self.classifier_names())
            .finish()
    }
}

impl CompositeClassifier {
    pub fn new(classifiers: Vec<Arc<dyn Classifier>>) -> Self {
        Self { classifiers }
    }

    /// Filename, fuzzy, regex, then TF-IDF, all built from `config`.
    ///
    /// # Errors
    ///
    /// `Validation` if a regex pattern in `config` does not compile.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        Ok(Self::new(vec![
            Arc::new(FilenameClassifier::from_config(config)),
            Arc::new(FuzzyClassifier::from_config(config)),
            Arc::new(RegexClassifier::from_config(config)?),
            Arc::new(TfidfClassifier::from_config(config)),
        ]))
    }

    pub fn classifier_names(&self) -> Vec<&str> {
        self.classifiers.iter().map(|c| c.name()).collect()
    }

    /// Warm up every strategy; failures are logged and left for classification time.
    pub fn warm_up_all(&self) {
        for classifier in &self.classifiers {
            if let Err(e) = classifier.warm_up() {
                tracing::warn!(classifier = classifier.name(), error = %e, "Warm-up failed");
            }
        }
    }

    async fn resolve(&self, document: &mut Document) -> ClassifierResult {
        for classifier in &self.classifiers {
            if let Err(e) = document.rewind() {
                tracing::warn!(classifier = classifier.name(), error = %e, "Failed to rewind document");
            }

            match AssertUnwindSafe(classifier.classify(document)).catch_unwind().await {
                Ok(result) if !result.is_unknown() => {
                    tracing::info!(
                        filename = document.filename(),
                        document_type = %result.document_type,
                        classifier = classifier.name(),
                        "Document classified"
                    );
                    return result.relabeled(classifier.name());
                }
                Ok(_) => {}
                Err(payload) => {
                    tracing::error!(
                        classifier = classifier.name(),
                        panic = panic_message(payload.as_ref()),
                        "Classifier panicked; skipping"
                    );
                }
            }
        }

        tracing::info!(filename = document.filename(), "No classifier matched");
        ClassifierResult::unknown(COMPOSITE_CLASSIFIER)
    }
}

#[async_trait]
impl Classifier for CompositeClassifier {
    fn name(&self) -> &str {
        COMPOSITE_CLASSIFIER
    }

    fn warm_up(&self) -> Result<()> {
        self.warm_up_all();
        Ok(())
    }

    async fn detect(&self, document: &mut Document) -> Result<Option<String>> {
        let result = self.resolve(document).await;
        Ok((!result.is_unknown()).then_some(result.document_type))
    }

    async fn classify(&self, document: &mut Document) -> ClassifierResult {
        self.resolve(document).await
    }
}
