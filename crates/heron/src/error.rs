//! Error types for Heron.
//!
//! All fallible operations return [`HeronError`]. The classification pipeline never
//! hands these to its callers: strategies turn them into an "unknown" result. They are
//! visible from the extraction layer, configuration loading, and the path-based entry
//! points, where a file that cannot be opened is reported as [`HeronError::Io`].
//!
//! Content problems (corrupt, empty or undecodable input, unsupported formats, a
//! missing OCR engine) are grouped by [`HeronError::is_extraction_failure`], which is
//! what the strategies check before deciding how loudly to log.
//!
//! ```rust
//! use heron::{HeronError, Result};
//!
//! fn non_empty_text(bytes: &[u8]) -> Result<&str> {
//!     let text = std::str::from_utf8(bytes)
//!         .map_err(|e| HeronError::extraction_with_source("Content is not valid UTF-8", e))?;
//!     if text.trim().is_empty() {
//!         return Err(HeronError::extraction("Document is empty"));
//!     }
//!     Ok(text)
//! }
//!
//! assert!(non_empty_text(b"  ").unwrap_err().is_extraction_failure());
//! ```
use thiserror::Error;

/// Result type alias using `HeronError`.
pub type Result<T> = std::result::Result<T, HeronError>;

/// Main error type for all Heron operations.
#[derive(Debug, Error)]
pub enum HeronError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error extracting text from file: {message}")]
    Extraction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Plugin error in '{plugin_name}': {message}")]
    Plugin { message: String, plugin_name: String },

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "excel")]
impl From<calamine::Error> for HeronError {
    fn from(err: calamine::Error) -> Self {
        HeronError::Extraction {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "pdf")]
/// PDFs are parsed from memory, so every lopdf failure is a content problem.
impl From<lopdf::Error> for HeronError {
    fn from(err: lopdf::Error) -> Self {
        HeronError::Extraction {
            message: format!("Invalid PDF: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for HeronError {
    fn from(err: serde_json::Error) -> Self {
        HeronError::Validation {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        paste::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl HeronError {
    error_constructor!(extraction, Extraction);
    error_constructor!(ocr, Ocr);
    error_constructor!(validation, Validation);

    /// Whether this error is one a content strategy absorbs into an "unknown" result.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            HeronError::Extraction { .. }
                | HeronError::UnsupportedFormat(_)
                | HeronError::Ocr { .. }
                | HeronError::MissingDependency(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HeronError = io_err.into();
        assert!(matches!(err, HeronError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_extraction_error_message() {
        let err = HeronError::extraction("No text could be extracted from the PDF");
        assert_eq!(
            err.to_string(),
            "Error extracting text from file: No text could be extracted from the PDF"
        );
        assert!(err.is_extraction_failure());
    }

    #[test]
    fn test_extraction_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad data");
        let err = HeronError::extraction_with_source("invalid format", source);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_error() {
        let err = HeronError::validation("invalid input");
        assert_eq!(err.to_string(), "Validation error: invalid input");
        assert!(!err.is_extraction_failure());
    }

    #[test]
    fn test_ocr_error_with_source() {
        let source = std::io::Error::other("tesseract failed");
        let err = HeronError::ocr_with_source("OCR failed", source);
        assert_eq!(err.to_string(), "OCR error: OCR failed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_unsupported_format_error() {
        let err = HeronError::UnsupportedFormat("application/zip".to_string());
        assert_eq!(err.to_string(), "Unsupported format: application/zip");
        assert!(err.is_extraction_failure());
    }

    #[test]
    fn test_plugin_error() {
        let err = HeronError::Plugin {
            message: "extraction failed".to_string(),
            plugin_name: "pdf-extractor".to_string(),
        };
        assert_eq!(err.to_string(), "Plugin error in 'pdf-extractor': extraction failed");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: HeronError = json_err.into();
        assert!(matches!(err, HeronError::Validation { .. }));
    }

    #[test]
    #[cfg(feature = "excel")]
    fn test_calamine_error_conversion() {
        let cal_err = calamine::Error::Msg("invalid Excel file");
        let err: HeronError = cal_err.into();
        assert!(matches!(err, HeronError::Extraction { .. }));
    }

    #[test]
    fn test_io_error_bubbles_unchanged() {
        fn read_file() -> Result<String> {
            let content = std::fs::read_to_string("/nonexistent/file.txt")?;
            Ok(content)
        }

        assert!(matches!(read_file().unwrap_err(), HeronError::Io(_)));
    }
}
