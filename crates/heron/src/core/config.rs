//! Configuration loading and management.
//!
//! [`ClassifierConfig`] carries every per-type table the classification strategies read
//! (filename keywords, fuzzy keywords, regex patterns, training phrases), the strategy
//! thresholds, and the upload limits enforced by the HTTP layer. It is loaded once at
//! startup from TOML, YAML, or JSON, or discovered as `heron.toml` in the working
//! directory or one of its parents, and treated as immutable afterwards.
//!
//! Document types are an ordered list: declaration order is the priority order for the
//! filename and regex strategies.

use crate::{HeronError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main classifier configuration.
///
/// # Example
///
/// ```rust
/// use heron::core::config::ClassifierConfig;
///
/// let config = ClassifierConfig::default();
/// assert_eq!(config.document_types.len(), 3);
/// assert_eq!(config.similarity_threshold, 80.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum fuzzy score (0-100) for the fuzzy strategy to accept a match.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Minimum posterior probability (0-1) for the statistical strategy to accept a prediction.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Vocabulary cap for the TF-IDF vectorizer.
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Document types in priority order.
    #[serde(default = "default_document_types")]
    pub document_types: Vec<DocumentTypeConfig>,

    /// Upload validation applied by the HTTP layer.
    #[serde(default)]
    pub upload: UploadConfig,

    /// Maximum concurrent classifications in batch operations (None = num_cpus * 2).
    #[serde(default)]
    pub max_concurrent_classifications: Option<usize>,
}

/// All pattern tables for one document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTypeConfig {
    /// Label reported in results (e.g. "invoice").
    pub name: String,

    /// Substrings matched against the lower-cased filename.
    #[serde(default)]
    pub filename_keywords: Vec<String>,

    /// Phrases scored approximately against the lower-cased filename.
    #[serde(default)]
    pub fuzzy_keywords: Vec<String>,

    /// Case-insensitive regular expressions matched against extracted content.
    #[serde(default)]
    pub regex_patterns: Vec<String>,

    /// Training phrases for the statistical model.
    #[serde(default)]
    pub training_examples: Vec<String>,
}

/// Upload limits for the HTTP boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

impl UploadConfig {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    /// Whether the filename carries one of the allowed extensions (case-insensitive).
    pub fn is_allowed(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_lowercase();
                self.allowed_extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext))
            }
            None => false,
        }
    }
}

fn default_similarity_threshold() -> f64 {
    80.0
}

fn default_confidence_threshold() -> f64 {
    0.65
}

fn default_max_features() -> usize {
    5000
}

fn default_max_file_size_mb() -> usize {
    10
}

fn default_allowed_extensions() -> Vec<String> {
    ["pdf", "doc", "docx", "xls", "xlsx", "jpg", "jpeg", "png", "csv", "txt"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_document_types() -> Vec<DocumentTypeConfig> {
    vec![
        DocumentTypeConfig {
            name: "drivers_licence".to_string(),
            filename_keywords: strings(&["drivers_license", "drivers_licence", "dl", "drivers_permit"]),
            fuzzy_keywords: strings(&[
                "drivers license",
                "driver's license",
                "drivers licence",
                "driver's licence",
                "driving license",
                "driving licence",
                "license",
                "licence",
                "permit",
                "id card",
                "identification",
                "driver id",
                "driver identification",
            ]),
            regex_patterns: strings(&[r"drivers?\s*licen[sc]e", r"dl\s*number", r"driver\s*id", r"drivers?\s*permit"]),
            training_examples: strings(&[
                "driver's license application form",
                "driver license renewal document",
                "driver's permit application",
                "driver identification card",
                "driver's license verification",
                "driver's license number",
                "driver's license expiration date",
                "driver's license photo",
                "driver's license address",
                "driver's license class",
                "driver's license renewal",
                "driver's license application",
                "driver's license test",
                "driver's license requirements",
                "driver's license office",
            ]),
        },
        DocumentTypeConfig {
            name: "bank_statement".to_string(),
            filename_keywords: strings(&["bank_statement", "account_statement", "statement", "banking_statement"]),
            fuzzy_keywords: strings(&[
                "bank statement",
                "account statement",
                "banking statement",
                "statement of account",
                "account summary",
                "bank summary",
                "transaction history",
                "account history",
                "banking summary",
                "statement",
                "bank account",
                "account details",
                "banking details",
                "transaction summary",
            ]),
            regex_patterns: strings(&[
                r"bank\s*statement",
                r"account\s*statement",
                r"transaction\s*history",
                r"account\s*summary",
                r"balance\s*sheet",
                r"account\s*balance",
                r"statement\s*period",
            ]),
            training_examples: strings(&[
                "bank account statement",
                "monthly bank statement",
                "account transaction history",
                "banking statement summary",
                "account balance sheet",
                "bank statement period",
                "account statement date",
                "bank statement transactions",
                "account statement balance",
                "account statement details",
                "bank statement summary",
                "bank statement period",
                "bank statement balance",
                "bank statement transactions",
                "bank statement account",
            ]),
        },
        DocumentTypeConfig {
            name: "invoice".to_string(),
            filename_keywords: strings(&["invoice"]),
            fuzzy_keywords: strings(&[
                "invoice",
                "bill",
                "receipt",
                "payment",
                "charge",
                "fee",
                "cost",
                "amount due",
                "total amount",
                "price",
                "quote",
                "estimate",
                "statement",
                "debit note",
                "credit note",
                "order",
                "purchase order",
                "sales order",
            ]),
            regex_patterns: strings(&[
                r"invoice",
                r"bill\s*to",
                r"amount\s*due",
                r"payment\s*terms",
                r"invoice\s*number",
                r"invoice\s*date",
            ]),
            training_examples: strings(&[
                "invoice for services rendered",
                "payment invoice",
                "service invoice",
                "invoice number",
                "invoice date",
                "invoice amount due",
                "invoice payment terms",
                "invoice billing address",
                "invoice line items",
                "invoice total amount",
                "invoice payment",
                "invoice details",
                "invoice summary",
                "invoice total",
                "invoice items",
                "invoice for payment",
                "invoice to be paid",
                "invoice due date",
                "invoice amount",
                "invoice description",
                "invoice from",
                "invoice to",
                "invoice reference",
                "invoice status",
                "invoice type",
            ]),
        },
    ]
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            confidence_threshold: default_confidence_threshold(),
            max_features: default_max_features(),
            document_types: default_document_types(),
            upload: UploadConfig::default(),
            max_concurrent_classifications: None,
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config_file(path.as_ref())?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| HeronError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config_file(path.as_ref())?;

        let config: Self = serde_yaml_ng::from_str(&content)
            .map_err(|e| HeronError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config_file(path.as_ref())?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| HeronError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration choosing the format from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()).map(|ext| ext.to_lowercase()) {
            Some(ext) if ext == "toml" => Self::from_toml_file(path),
            Some(ext) if ext == "yaml" || ext == "yml" => Self::from_yaml_file(path),
            Some(ext) if ext == "json" => Self::from_json_file(path),
            _ => Err(HeronError::validation(format!(
                "Unsupported config file format: {}",
                path.display()
            ))),
        }
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `heron.toml` in the current directory and its ancestors.
    /// Returns `None` if no file is found.
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(HeronError::Io)?;

        loop {
            let heron_toml = current.join("heron.toml");
            if heron_toml.exists() {
                return Ok(Some(Self::from_toml_file(heron_toml)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Check thresholds, type names, keywords, and regex syntax.
    pub fn validate(&self) -> Result<()> {
        if self.document_types.is_empty() {
            return Err(HeronError::validation("At least one document type must be configured"));
        }

        if !(0.0..=100.0).contains(&self.similarity_threshold) {
            return Err(HeronError::validation(format!(
                "similarity_threshold must be within 0-100, got {}",
                self.similarity_threshold
            )));
        }

        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(HeronError::validation(format!(
                "confidence_threshold must be within 0-1, got {}",
                self.confidence_threshold
            )));
        }

        if self.max_features == 0 {
            return Err(HeronError::validation("max_features must be at least 1"));
        }

        let mut seen = ahash::AHashSet::new();
        for doc_type in &self.document_types {
            if doc_type.name.trim().is_empty() {
                return Err(HeronError::validation("Document type name cannot be empty"));
            }
            if doc_type.name == crate::types::UNKNOWN_DOCUMENT_TYPE {
                return Err(HeronError::validation(
                    "'unknown' is reserved and cannot be used as a document type",
                ));
            }
            if !seen.insert(doc_type.name.as_str()) {
                return Err(HeronError::validation(format!(
                    "Duplicate document type: {}",
                    doc_type.name
                )));
            }
            let mut keywords = doc_type.filename_keywords.iter().chain(&doc_type.fuzzy_keywords);
            if keywords.any(|keyword| keyword.trim().is_empty()) {
                return Err(HeronError::validation(format!(
                    "Empty keyword configured for '{}'",
                    doc_type.name
                )));
            }
            for pattern in &doc_type.regex_patterns {
                regex::Regex::new(pattern).map_err(|e| {
                    HeronError::validation_with_source(
                        format!("Invalid regex for '{}': {}", doc_type.name, pattern),
                        e,
                    )
                })?;
            }
        }

        Ok(())
    }

    /// Names of the configured document types in priority order.
    pub fn document_type_names(&self) -> Vec<&str> {
        self.document_types.iter().map(|t| t.name.as_str()).collect()
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| HeronError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
