//! Configuration loading integration tests.
//!
//! Covers file loading in each supported format, discovery through parent
//! directories, and custom document types flowing through the whole pipeline.

use heron::core::classifier::classify_bytes;
use heron::{ClassifierConfig, ClassifierResult, CompositeClassifier, HeronError};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

const CONTRACT_TOML: &str = r#"
similarity_threshold = 90.0

[[document_types]]
name = "contract"
filename_keywords = ["contract", "agreement"]
fuzzy_keywords = ["contract"]
regex_patterns = ['terms\s+and\s+conditions', 'hereby\s+agree']
training_examples = ["service agreement between parties", "contract terms and signatures"]

[[document_types]]
name = "payslip"
filename_keywords = ["payslip"]
regex_patterns = ['gross\s+pay', 'net\s+pay']
training_examples = ["monthly payslip gross pay", "employee net pay summary"]
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_from_file_toml_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "heron.toml", CONTRACT_TOML);

    let config = ClassifierConfig::from_file(&path).unwrap();

    assert_eq!(config.document_type_names(), vec!["contract", "payslip"]);
    assert_eq!(config.similarity_threshold, 90.0);
    assert_eq!(config.confidence_threshold, 0.65);
    assert_eq!(config.upload.max_file_size_mb, 10);
}

#[test]
fn test_from_file_yaml_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let yaml_content = r#"
confidence_threshold: 0.5
max_concurrent_classifications: 4
upload:
  allowed_extensions: [pdf, txt]
  max_file_size_mb: 2
document_types:
  - name: receipt
    filename_keywords: [receipt]
"#;
    let path = write(&temp_dir, "heron.yml", yaml_content);

    let config = ClassifierConfig::from_file(&path).unwrap();

    assert_eq!(config.confidence_threshold, 0.5);
    assert_eq!(config.max_concurrent_classifications, Some(4));
    assert_eq!(config.upload.allowed_extensions, vec!["pdf", "txt"]);
    assert_eq!(config.upload.max_file_size_bytes(), 2 * 1024 * 1024);
    assert_eq!(config.document_types[0].name, "receipt");
    assert!(config.document_types[0].regex_patterns.is_empty());
}

#[test]
fn test_from_file_json_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(
        &temp_dir,
        "heron.json",
        r#"{"document_types": [{"name": "memo", "regex_patterns": ["memorandum"]}]}"#,
    );

    let config = ClassifierConfig::from_file(&path).unwrap();

    assert_eq!(config.document_type_names(), vec!["memo"]);
    assert_eq!(config.similarity_threshold, 80.0);
}

#[test]
fn test_unsupported_extension_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "heron.ini", "similarity_threshold = 80");

    let err = ClassifierConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, HeronError::Validation { .. }));
}

#[test]
fn test_malformed_toml_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "heron.toml", "document_types = [[[");

    let err = ClassifierConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, HeronError::Validation { .. }));
    assert!(err.to_string().contains("Invalid TOML"));
}

#[test]
fn test_empty_document_types_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "heron.json", r#"{"document_types": []}"#);

    assert!(ClassifierConfig::from_file(&path).is_err());
}

#[test]
fn test_duplicate_type_names_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let toml_content = r#"
[[document_types]]
name = "invoice"

[[document_types]]
name = "invoice"
"#;
    let path = write(&temp_dir, "heron.toml", toml_content);

    let err = ClassifierConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Duplicate document type"));
}

#[test]
#[serial]
fn test_discover_searches_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    write(&temp_dir, "heron.toml", CONTRACT_TOML);
    let nested = temp_dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(&nested).unwrap();
    let discovered = ClassifierConfig::discover();
    std::env::set_current_dir(original_dir).unwrap();

    let config = discovered.unwrap().expect("heron.toml should be found in an ancestor");
    assert_eq!(config.document_type_names(), vec!["contract", "payslip"]);
}

#[tokio::test]
#[serial]
async fn test_custom_types_drive_the_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "heron.toml", CONTRACT_TOML);
    let config = ClassifierConfig::from_file(&path).unwrap();
    let classifier = CompositeClassifier::from_config(&config).unwrap();

    let by_name = classify_bytes(b"anything".to_vec(), "Signed_Agreement.pdf", &classifier).await;
    assert_eq!(by_name, ClassifierResult::new("contract", "FilenameClassifier"));

    let by_content = classify_bytes(b"Gross Pay: 3000\nNet Pay: 2400".to_vec(), "upload.txt", &classifier).await;
    assert_eq!(by_content, ClassifierResult::new("payslip", "RegexClassifier"));

    let reference_type = classify_bytes(b"Invoice Number 1001".to_vec(), "upload.txt", &classifier).await;
    assert!(reference_type.is_unknown());
}
