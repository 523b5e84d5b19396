//! Native Tesseract OCR backend.

use crate::plugins::{OcrBackend, Plugin};
use crate::{HeronError, Result};
use async_trait::async_trait;
use kreuzberg_tesseract::TesseractAPI;
use std::env;
use std::path::{Path, PathBuf};

const FALLBACK_TESSDATA_PATHS: &[&str] = &[
    "/opt/homebrew/share/tessdata",
    "/opt/homebrew/opt/tesseract/share/tessdata",
    "/usr/local/opt/tesseract/share/tessdata",
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
];

/// Locate the tessdata directory: `TESSDATA_PREFIX` first, then common install paths.
pub fn resolve_tessdata_path() -> Option<PathBuf> {
    if let Ok(prefix) = env::var("TESSDATA_PREFIX")
        && !prefix.trim().is_empty()
    {
        return Some(PathBuf::from(prefix));
    }

    FALLBACK_TESSDATA_PATHS
        .iter()
        .map(Path::new)
        .find(|path| path.exists())
        .map(Path::to_path_buf)
}

pub struct TesseractBackend {
    tessdata_path: PathBuf,
}

impl TesseractBackend {
    /// # Errors
    ///
    /// `MissingDependency` when no tessdata directory can be found.
    pub fn new() -> Result<Self> {
        let tessdata_path = resolve_tessdata_path()
            .ok_or_else(|| HeronError::MissingDependency("Tesseract language data (tessdata) not found".to_string()))?;
        Ok(Self::with_tessdata_path(tessdata_path))
    }

    pub fn with_tessdata_path(tessdata_path: impl Into<PathBuf>) -> Self {
        Self {
            tessdata_path: tessdata_path.into(),
        }
    }

    fn recognize(tessdata_path: &Path, image_bytes: &[u8], language: &str) -> Result<String> {
        let img = image::load_from_memory(image_bytes)
            .map_err(|e| HeronError::ocr_with_source(format!("Failed to decode image: {}", e), e))?;

        let rgb_image = img.to_rgb8();
        let (width, height) = rgb_image.dimensions();
        let bytes_per_pixel = 3;
        let bytes_per_line = width * bytes_per_pixel;

        let api = TesseractAPI::new();
        let tessdata = tessdata_path.to_string_lossy();

        api.init(tessdata.as_ref(), language)
            .map_err(|e| HeronError::ocr(format!("Failed to initialize language '{}': {}", language, e)))?;

        api.set_image(
            rgb_image.as_raw(),
            width as i32,
            height as i32,
            bytes_per_pixel as i32,
            bytes_per_line as i32,
        )
        .map_err(|e| HeronError::ocr(format!("Failed to set image: {}", e)))?;

        api.recognize()
            .map_err(|e| HeronError::ocr(format!("Failed to recognize text: {}", e)))?;

        api.get_utf8_text()
            .map_err(|e| HeronError::ocr(format!("Failed to extract text: {}", e)))
    }
}

impl Plugin for TesseractBackend {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn version(&self) -> String {
        TesseractAPI::version()
    }

    fn description(&self) -> &str {
        "Tesseract OCR engine"
    }
}

#[async_trait]
impl OcrBackend for TesseractBackend {
    async fn process_image(&self, image_bytes: &[u8], language: &str) -> Result<String> {
        // tesseract can crash on an empty or missing language instead of returning an error
        if !self.supports_language(language) {
            return Err(HeronError::MissingDependency(format!(
                "Tesseract language '{}' is not installed in {}",
                language,
                self.tessdata_path.display()
            )));
        }

        let tessdata_path = self.tessdata_path.clone();
        let bytes = image_bytes.to_vec();
        let language = language.to_string();

        tokio::task::spawn_blocking(move || Self::recognize(&tessdata_path, &bytes, &language))
            .await
            .map_err(|e| HeronError::ocr(format!("OCR task failed: {}", e)))?
    }

    fn supports_language(&self, lang: &str) -> bool {
        let lang = lang.trim();
        !lang.is_empty()
            && lang
                .split('+')
                .all(|part| self.tessdata_path.join(format!("{}.traineddata", part.trim())).exists())
    }
}
