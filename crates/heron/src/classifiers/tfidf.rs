use super::Classifier;
use crate::core::config::ClassifierConfig;
use crate::core::document::Document;
use crate::core::extractor::extract_text;
use crate::text::naive_bayes::MultinomialNaiveBayes;
use crate::text::tfidf::TfidfVectorizer;
use crate::types::TFIDF_CLASSIFIER;
use crate::{HeronError, Result};
use async_trait::async_trait;
use once_cell::sync::OnceCell;

const LAPLACE_ALPHA: f64 = 1.0;

/// Vectorizer and model fitted on the training phrases.
#[derive(Debug)]
pub struct TrainedModel {
    vectorizer: TfidfVectorizer,
    model: MultinomialNaiveBayes,
}

impl TrainedModel {
    /// Most probable type for `text` with its posterior.
    pub fn predict(&self, text: &str) -> Option<(&str, f64)> {
        self.model.predict(&self.vectorizer.transform(text))
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    pub fn classes(&self) -> &[String] {
        self.model.classes()
    }
}

/// TF-IDF features with a multinomial naive Bayes model.
///
/// The model is trained on first use and never retrained. A prediction is accepted only
/// when its posterior reaches `confidence_threshold`.
#[derive(Debug)]
pub struct TfidfClassifier {
    training_examples: Vec<(String, String)>,
    max_features: usize,
    confidence_threshold: f64,
    model: OnceCell<TrainedModel>,
}

impl TfidfClassifier {
    /// `training_examples` pairs a document type with one training phrase.
    pub fn new(training_examples: Vec<(String, String)>, max_features: usize, confidence_threshold: f64) -> Self {
        Self {
            training_examples,
            max_features,
            confidence_threshold,
            model: OnceCell::new(),
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        let examples = config
            .document_types
            .iter()
            .flat_map(|t| t.training_examples.iter().map(|e| (t.name.clone(), e.clone())))
            .collect();
        Self::new(examples, config.max_features, config.confidence_threshold)
    }

    /// Train the model if it has not been trained yet.
    ///
    /// Concurrent callers block until the single training run finishes; later calls
    /// return the same model.
    pub fn train(&self) -> Result<&TrainedModel> {
        self.model.get_or_try_init(|| self.fit())
    }

    pub fn is_trained(&self) -> bool {
        self.model.get().is_some()
    }

    fn fit(&self) -> Result<TrainedModel> {
        if self.training_examples.is_empty() {
            return Err(HeronError::validation("No training examples configured"));
        }

        let documents: Vec<String> = self.training_examples.iter().map(|(_, text)| text.clone()).collect();
        let labels: Vec<&str> = self.training_examples.iter().map(|(label, _)| label.as_str()).collect();

        let mut vectorizer = TfidfVectorizer::new(self.max_features);
        let features = vectorizer.fit_transform(&documents)?;

        let mut model = MultinomialNaiveBayes::new(LAPLACE_ALPHA);
        model.fit(&features, &labels)?;

        tracing::info!(
            examples = documents.len(),
            vocabulary = vectorizer.vocabulary_size(),
            classes = model.classes().len(),
            "Trained TF-IDF classifier"
        );

        Ok(TrainedModel { vectorizer, model })
    }

    fn predict(&self, text: &str) -> Result<Option<String>> {
        let trained = self.train()?;

        match trained.predict(text) {
            Some((label, probability)) if probability >= self.confidence_threshold => {
                tracing::debug!(document_type = label, probability, "TF-IDF prediction accepted");
                Ok(Some(label.to_string()))
            }
            Some((label, probability)) => {
                tracing::debug!(document_type = label, probability, "TF-IDF prediction below threshold");
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Classifier for TfidfClassifier {
    fn name(&self) -> &str {
        TFIDF_CLASSIFIER
    }

    fn warm_up(&self) -> Result<()> {
        self.train().map(|_| ())
    }

    async fn detect(&self, document: &mut Document) -> Result<Option<String>> {
        self.train()?;
        let extraction = extract_text(document).await?;
        self.predict(&extraction.content)
    }
}
