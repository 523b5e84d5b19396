use super::Classifier;
use crate::Result;
use crate::core::config::ClassifierConfig;
use crate::core::document::Document;
use crate::text::similarity::weighted_ratio;
use crate::types::FUZZY_CLASSIFIER;
use async_trait::async_trait;

/// Approximate keyword matching against the lower-cased filename.
///
/// Every keyword of every type is scored with [`weighted_ratio`]; the single best
/// score decides, provided it reaches `threshold`. Ties keep the type declared first.
#[derive(Debug, Clone)]
pub struct FuzzyClassifier {
    keywords: Vec<(String, Vec<String>)>,
    threshold: f64,
}

impl FuzzyClassifier {
    pub fn new(keywords: Vec<(String, Vec<String>)>, threshold: f64) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|(name, words)| (name, words.into_iter().map(|w| w.to_lowercase()).collect()))
            .collect();
        Self { keywords, threshold }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(
            config
                .document_types
                .iter()
                .map(|t| (t.name.clone(), t.fuzzy_keywords.clone()))
                .collect(),
            config.similarity_threshold,
        )
    }

    /// Best-scoring type and its score, regardless of the threshold.
    pub fn best_match(&self, filename: &str) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;

        for (name, words) in &self.keywords {
            let score = words
                .iter()
                .map(|word| weighted_ratio(filename, word))
                .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |a| a.max(s))));

            if let Some(score) = score
                && best.is_none_or(|(_, current)| score > current)
            {
                best = Some((name.as_str(), score));
            }
        }

        best
    }
}

#[async_trait]
impl Classifier for FuzzyClassifier {
    fn name(&self) -> &str {
        FUZZY_CLASSIFIER
    }

    async fn detect(&self, document: &mut Document) -> Result<Option<String>> {
        let filename = document.normalized_filename();

        match self.best_match(&filename) {
            Some((name, score)) if score >= self.threshold => {
                tracing::debug!(filename = %filename, document_type = name, score, "Fuzzy match");
                Ok(Some(name.to_string()))
            }
            _ => Ok(None),
        }
    }
}
