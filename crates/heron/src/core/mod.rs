//! Core classification orchestration.
//!
//! - **Entry points** (`classifier`): `classify_bytes()`, `classify_file()` and their batch
//!   and sync variants
//! - **Documents** (`document`): filename plus seekable stream, rewound between readers
//! - **MIME selection** (`mime`): extension map corroborated by content sniffing
//! - **Extraction** (`extractor`): registry lookup and text extraction
//! - **Configuration** (`config`): per-type pattern tables and thresholds
//!
//! # Example
//!
//! ```rust,no_run
//! use heron::core::classifier::classify_file;
//! use heron::classifiers::CompositeClassifier;
//! use heron::core::config::ClassifierConfig;
//!
//! # async fn example() -> heron::Result<()> {
//! let classifier = CompositeClassifier::from_config(&ClassifierConfig::default())?;
//! let result = classify_file("statement.pdf", &classifier).await?;
//! println!("{}", result.document_type);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "tokio-runtime")]
pub mod batch_mode;
#[cfg(feature = "tokio-runtime")]
pub mod classifier;
pub mod config;
pub mod document;
pub mod extractor;
pub mod mime;

#[cfg(feature = "tokio-runtime")]
pub use classifier::{
    batch_classify_bytes, batch_classify_files, classify_bytes, classify_document, classify_file, default_classifier,
};
pub use config::{ClassifierConfig, DocumentTypeConfig, UploadConfig};
pub use document::Document;
pub use extractor::extract_text;
