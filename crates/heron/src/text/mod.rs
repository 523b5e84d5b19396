//! Text scoring primitives used by the classification strategies.
//!
//! - [`similarity`]: fuzzy string ratios on a 0-100 scale
//! - [`tfidf`]: unigram/bigram TF-IDF vectorizer
//! - [`naive_bayes`]: multinomial naive Bayes over TF-IDF vectors
//! - [`stopwords`]: English stop word list

pub mod naive_bayes;
pub mod similarity;
pub mod stopwords;
pub mod tfidf;

pub use naive_bayes::MultinomialNaiveBayes;
pub use similarity::weighted_ratio;
pub use tfidf::TfidfVectorizer;
