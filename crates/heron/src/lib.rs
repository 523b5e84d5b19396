//! Heron - document classification pipeline
//!
//! Heron turns an uploaded document (PDF, Word, spreadsheet, image, or plain text) into
//! one of a small set of configured document types, or "unknown". Text is extracted by
//! format-specific plugins and fed, together with the filename, to a chain of
//! strategies: filename keywords, fuzzy keyword matching, regular expressions, and a
//! TF-IDF naive Bayes model. The first confident strategy decides.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use heron::{classify_bytes_sync, default_classifier};
//!
//! let result = classify_bytes_sync(b"Invoice number 1001".to_vec(), "upload.txt", &default_classifier());
//! println!("{} ({})", result.document_type, result.classifier_name);
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): entry points, documents, MIME selection, config loading
//! - **Plugin System** (`plugins`): extractor and OCR backend registries
//! - **Extractors** (`extractors`): PDF, Word, Excel, image and text extraction
//! - **Classifiers** (`classifiers`): the strategies and the composite orchestrator
//! - **Text** (`text`): similarity scores, TF-IDF, naive Bayes

#![deny(unsafe_code)]

pub mod classifiers;
pub mod core;
pub mod error;
pub mod extractors;
pub mod plugins;
pub mod store;
pub mod text;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "ocr")]
pub mod ocr;

pub use error::{HeronError, Result};
pub use types::*;

pub use classifiers::{
    Classifier, CompositeClassifier, FilenameClassifier, FuzzyClassifier, RegexClassifier, TfidfClassifier,
};
pub use core::config::{ClassifierConfig, DocumentTypeConfig, UploadConfig};
pub use core::document::Document;

#[cfg(feature = "tokio-runtime")]
pub use core::classifier::{
    batch_classify_bytes, batch_classify_bytes_sync, batch_classify_files, classify_bytes, classify_bytes_sync,
    classify_document, classify_file, classify_file_sync, default_classifier,
};

pub use core::mime::{
    CSV_MIME_TYPE, DOCX_MIME_TYPE, EXCEL_BINARY_MIME_TYPE, EXCEL_MIME_TYPE, JPEG_MIME_TYPE, LEGACY_WORD_MIME_TYPE,
    PDF_MIME_TYPE, PLAIN_TEXT_MIME_TYPE, PNG_MIME_TYPE,
};

pub use plugins::registry::{get_document_extractor_registry, get_ocr_backend_registry};
pub use store::{InMemoryResultStore, ResultStore, StoredClassification};
