//! Main classification entry points.
//!
//! This module provides the public API for classifying documents with a
//! [`CompositeClassifier`]. Classification itself never fails: every call yields a
//! [`ClassifierResult`], "unknown" included. The only surfaced errors are I/O failures
//! opening a path handed to [`classify_file`].
//!
//! # Example
//!
//! ```rust,no_run
//! use heron::core::classifier::{classify_bytes, default_classifier};
//!
//! # async fn example() {
//! let result = classify_bytes(b"Invoice number 1001".to_vec(), "upload.txt", &default_classifier()).await;
//! println!("{} via {}", result.document_type, result.classifier_name);
//! # }
//! ```

use crate::classifiers::{Classifier, CompositeClassifier};
use crate::core::config::ClassifierConfig;
use crate::core::document::Document;
use crate::types::ClassifierResult;
use crate::{HeronError, Result};
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;

/// Global Tokio runtime for synchronous operations.
///
/// Building the runtime fails only when the system is out of resources, so it
/// fails fast instead of returning errors from every sync call.
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

static DEFAULT_CLASSIFIER: Lazy<Arc<CompositeClassifier>> = Lazy::new(|| {
    let classifier = CompositeClassifier::from_config(&ClassifierConfig::default())
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Reference configuration rejected; using an empty pipeline");
            CompositeClassifier::new(Vec::new())
        });
    Arc::new(classifier)
});

/// Process-wide pipeline built from the reference configuration.
///
/// Its statistical model is trained at most once for the lifetime of the process.
pub fn default_classifier() -> Arc<CompositeClassifier> {
    Arc::clone(&DEFAULT_CLASSIFIER)
}

/// Classify an already opened document.
pub async fn classify_document(document: &mut Document, classifier: &CompositeClassifier) -> ClassifierResult {
    classifier.classify(document).await
}

/// Classify an in-memory document.
pub async fn classify_bytes(
    content: impl Into<Vec<u8>>,
    filename: &str,
    classifier: &CompositeClassifier,
) -> ClassifierResult {
    let mut document = Document::from_bytes(filename, content);
    classify_document(&mut document, classifier).await
}

/// Classify a file on disk; the filename strategies see the path's final component.
///
/// # Errors
///
/// `HeronError::Io` if the file cannot be opened.
pub async fn classify_file(path: impl AsRef<Path>, classifier: &CompositeClassifier) -> Result<ClassifierResult> {
    let mut document = Document::open(path)?;
    Ok(classify_document(&mut document, classifier).await)
}

/// Classify many in-memory documents concurrently.
///
/// Concurrency is bounded by `max_concurrent` (default: twice the CPU count). Results
/// are returned in input order.
///
/// # Errors
///
/// Fails only when a classification task itself could not complete.
pub async fn batch_classify_bytes(
    documents: Vec<(Vec<u8>, String)>,
    classifier: Arc<CompositeClassifier>,
    max_concurrent: Option<usize>,
) -> Result<Vec<ClassifierResult>> {
    use tokio::sync::Semaphore;
    use tokio::task::JoinSet;

    if documents.is_empty() {
        return Ok(vec![]);
    }

    let max_concurrent = max_concurrent.unwrap_or_else(|| num_cpus::get() * 2).max(1);
    let semaphore = Arc::new(Semaphore::new(max_concurrent));

    let mut tasks = JoinSet::new();

    for (index, (content, filename)) in documents.into_iter().enumerate() {
        let classifier = Arc::clone(&classifier);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .map_err(|e| HeronError::Other(format!("Batch semaphore closed: {}", e)))?;
            let result = crate::core::batch_mode::with_batch_mode(async {
                classify_bytes(content, &filename, &classifier).await
            })
            .await;
            Ok::<_, HeronError>((index, result))
        });
    }

    let mut results: Vec<Option<ClassifierResult>> = vec![None; tasks.len()];

    while let Some(task_result) = tasks.join_next().await {
        match task_result {
            Ok(Ok((index, result))) => {
                results[index] = Some(result);
            }
            Ok(Err(e)) => return Err(e),
            Err(join_err) => {
                return Err(HeronError::Other(format!("Task panicked: {}", join_err)));
            }
        }
    }

    results
        .into_iter()
        .map(|r| r.ok_or_else(|| HeronError::Other("Missing batch result".to_string())))
        .collect()
}

/// Classify many files concurrently, in input order.
///
/// # Errors
///
/// `HeronError::Io` if any file cannot be read.
pub async fn batch_classify_files(
    paths: Vec<impl AsRef<Path>>,
    classifier: Arc<CompositeClassifier>,
    max_concurrent: Option<usize>,
) -> Result<Vec<ClassifierResult>> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        documents.push((content, filename));
    }

    batch_classify_bytes(documents, classifier, max_concurrent).await
}

/// Synchronous wrapper for [`classify_bytes`].
pub fn classify_bytes_sync(content: impl Into<Vec<u8>>, filename: &str, classifier: &CompositeClassifier) -> ClassifierResult {
    GLOBAL_RUNTIME.block_on(classify_bytes(content, filename, classifier))
}

/// Synchronous wrapper for [`classify_file`].
pub fn classify_file_sync(path: impl AsRef<Path>, classifier: &CompositeClassifier) -> Result<ClassifierResult> {
    GLOBAL_RUNTIME.block_on(classify_file(path, classifier))
}

/// Synchronous wrapper for [`batch_classify_bytes`].
pub fn batch_classify_bytes_sync(
    documents: Vec<(Vec<u8>, String)>,
    classifier: Arc<CompositeClassifier>,
    max_concurrent: Option<usize>,
) -> Result<Vec<ClassifierResult>> {
    GLOBAL_RUNTIME.block_on(batch_classify_bytes(documents, classifier, max_concurrent))
}
