//! TF-IDF vectorizer over unigrams and bigrams.
//!
//! Text is lower-cased, split into tokens of at least two word characters, and
//! stripped of English stop words before bigrams are formed. The vocabulary keeps the
//! `max_features` terms with the highest total count across the corpus. Weights use the
//! smoothed idf `ln((1 + n) / (1 + df)) + 1` and each vector is L2-normalized.

use crate::text::stopwords::is_stopword;
use crate::{HeronError, Result};
use ahash::{AHashMap, AHashSet};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("Token regex pattern is valid and should compile"));

/// Unigram and bigram terms of `text`, in order of appearance.
pub fn analyze(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stopword(token))
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: AHashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: AHashMap::new(),
            idf: Vec::new(),
        }
    }

    /// Learn vocabulary and idf weights, returning the training matrix.
    ///
    /// # Errors
    ///
    /// `Validation` when the corpus yields no terms (empty, or only stop words).
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<Vec<f64>>> {
        let analyzed: Vec<Vec<String>> = documents.iter().map(|doc| analyze(doc)).collect();

        // alphabetical order keeps ties deterministic
        let mut term_counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for terms in &analyzed {
            let mut seen = AHashSet::new();
            for term in terms {
                let entry = term_counts.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                if seen.insert(term.as_str()) {
                    entry.1 += 1;
                }
            }
        }

        if term_counts.is_empty() {
            return Err(HeronError::validation(
                "Empty vocabulary; training examples contain only stop words",
            ));
        }

        let mut ranked: Vec<(&str, usize, usize)> =
            term_counts.into_iter().map(|(term, (count, df))| (term, count, df)).collect();
        if ranked.len() > self.max_features {
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            ranked.truncate(self.max_features);
            ranked.sort_by(|a, b| a.0.cmp(b.0));
        }

        let n_documents = documents.len() as f64;
        self.vocabulary = ranked
            .iter()
            .enumerate()
            .map(|(index, (term, _, _))| (term.to_string(), index))
            .collect();
        self.idf = ranked
            .iter()
            .map(|(_, _, df)| ((1.0 + n_documents) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        Ok(analyzed.iter().map(|terms| self.vectorize(terms)).collect())
    }

    /// Weight vector for unseen text; all zeros when no term is in the vocabulary.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        self.vectorize(&analyze(text))
    }

    fn vectorize(&self, terms: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for term in terms {
            if let Some(&index) = self.vocabulary.get(term) {
                vector[index] += 1.0;
            }
        }

        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }
}
