//! Multinomial naive Bayes over dense feature vectors.

use crate::{HeronError, Result};

#[derive(Debug, Clone)]
pub struct MultinomialNaiveBayes {
    alpha: f64,
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNaiveBayes {
    /// Laplace smoothing with the given `alpha`.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            classes: Vec::new(),
            class_log_prior: Vec::new(),
            feature_log_prob: Vec::new(),
        }
    }

    /// Fit on rows of `features` labelled by `labels`.
    ///
    /// Classes are kept in sorted order; prediction ties resolve to the first of them.
    pub fn fit(&mut self, features: &[Vec<f64>], labels: &[&str]) -> Result<()> {
        if features.is_empty() || features.len() != labels.len() {
            return Err(HeronError::validation(format!(
                "Expected one label per sample, got {} samples and {} labels",
                features.len(),
                labels.len()
            )));
        }

        let mut classes: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        classes.sort();
        classes.dedup();

        let n_features = features[0].len();
        let mut class_counts = vec![0usize; classes.len()];
        let mut feature_counts = vec![vec![0.0f64; n_features]; classes.len()];

        for (row, label) in features.iter().zip(labels) {
            let class_index = classes.iter().position(|c| c == label).unwrap_or_default();
            class_counts[class_index] += 1;
            for (count, value) in feature_counts[class_index].iter_mut().zip(row) {
                *count += value;
            }
        }

        let total = features.len() as f64;
        self.class_log_prior = class_counts.iter().map(|&c| (c as f64 / total).ln()).collect();
        self.feature_log_prob = feature_counts
            .iter()
            .map(|counts| {
                let smoothed_total: f64 = counts.iter().sum::<f64>() + self.alpha * n_features as f64;
                counts
                    .iter()
                    .map(|count| ((count + self.alpha) / smoothed_total).ln())
                    .collect()
            })
            .collect();
        self.classes = classes;

        Ok(())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Posterior probability of each class, in [`classes`](Self::classes) order.
    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let joint: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| prior + log_probs.iter().zip(features).map(|(lp, x)| lp * x).sum::<f64>())
            .collect();

        let max = joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = joint.iter().map(|j| (j - max).exp()).collect();
        let sum: f64 = exp.iter().sum();
        exp.iter().map(|e| e / sum).collect()
    }

    /// Most probable class and its posterior.
    pub fn predict(&self, features: &[f64]) -> Option<(&str, f64)> {
        let probabilities = self.predict_proba(features);
        let mut best: Option<(usize, f64)> = None;
        for (index, &p) in probabilities.iter().enumerate() {
            if best.is_none_or(|(_, current)| p > current) {
                best = Some((index, p));
            }
        }
        best.map(|(index, p)| (self.classes[index].as_str(), p))
    }
}
