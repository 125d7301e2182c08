//! OCR Engines
//!
//! Defines the engine trait and the Tesseract command-line implementation.

use std::io::Cursor;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use image::DynamicImage;

use super::types::{OcrError, SegmentationMode};

/// OCR engine trait
///
/// Engines are synchronous: the pipeline calls them from a blocking worker
/// thread, one region or page at a time.
pub trait OcrEngine: Send + Sync {
    /// Engine identifier (e.g. "tesseract")
    fn name(&self) -> &'static str;

    /// Check if the engine can be invoked
    fn is_available(&self) -> bool;

    /// Recognize the text of an image, returning it as raw text
    fn recognize(
        &self,
        image: &DynamicImage,
        mode: SegmentationMode,
        language: &str,
    ) -> Result<String, OcrError>;
}

/// Tesseract OCR via the `tesseract` executable
pub struct TesseractEngine {
    /// Path to the tesseract binary (default: "tesseract" - uses PATH)
    command: String,
    /// Directory for temporary input images
    temp_dir: PathBuf,
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl TesseractEngine {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Validate language code to prevent argument injection
    fn validate_language(lang: &str) -> Result<(), OcrError> {
        // e.g. "eng", "eng+deu", "chi_sim"
        if lang.is_empty() || lang.len() > 20 {
            return Err(OcrError::InvalidLanguage(lang.to_string()));
        }
        if !lang
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '_')
        {
            return Err(OcrError::InvalidLanguage(lang.to_string()));
        }
        Ok(())
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn recognize(
        &self,
        image: &DynamicImage,
        mode: SegmentationMode,
        language: &str,
    ) -> Result<String, OcrError> {
        Self::validate_language(language)?;

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| OcrError::ImageEncoding(e.to_string()))?;

        let input_path = self
            .temp_dir
            .join(format!("ocr_input_{}.png", uuid::Uuid::new_v4()));
        std::fs::write(&input_path, &png)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to write temp file: {}", e)))?;

        let output = Command::new(&self.command)
            .arg(&input_path)
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .arg("--oem")
            .arg("3")
            .arg("--psm")
            .arg(mode.psm().to_string())
            .output();

        let _ = std::fs::remove_file(&input_path);

        let output = output.map_err(|e| {
            OcrError::EngineNotAvailable(format!("Failed to run {}: {}", self.command, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "Tesseract failed: {}",
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Scripted engine for testing
#[cfg(test)]
pub struct MockEngine {
    respond: Box<dyn Fn(&DynamicImage, SegmentationMode) -> Result<String, OcrError> + Send + Sync>,
    calls: parking_lot::Mutex<Vec<(u32, u32, SegmentationMode)>>,
}

#[cfg(test)]
impl MockEngine {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&DynamicImage, SegmentationMode) -> Result<String, OcrError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: parking_lot::Mutex::new(Vec::new()),
        }
    }

    pub fn returning(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_, _| Ok(text.clone()))
    }

    /// `(width, height, mode)` of every image recognized so far
    pub fn calls(&self) -> Vec<(u32, u32, SegmentationMode)> {
        self.calls.lock().clone()
    }
}

#[cfg(test)]
impl OcrEngine for MockEngine {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn recognize(
        &self,
        image: &DynamicImage,
        mode: SegmentationMode,
        _language: &str,
    ) -> Result<String, OcrError> {
        self.calls.lock().push((image.width(), image.height(), mode));
        (self.respond)(image, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_language_validation() {
        assert!(TesseractEngine::validate_language("eng").is_ok());
        assert!(TesseractEngine::validate_language("eng+deu").is_ok());
        assert!(TesseractEngine::validate_language("chi_sim").is_ok());
        assert!(TesseractEngine::validate_language("").is_err());
        assert!(TesseractEngine::validate_language("eng --psm 0").is_err());
        assert!(TesseractEngine::validate_language(&"a".repeat(21)).is_err());
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let engine = TesseractEngine::new("definitely-not-a-tesseract-binary");
        assert!(!engine.is_available());

        let image = DynamicImage::ImageRgb8(RgbImage::new(8, 8));
        let result = engine.recognize(&image, SegmentationMode::Block, "eng");
        assert!(matches!(result, Err(OcrError::EngineNotAvailable(_))));
    }

    #[test]
    fn test_invalid_language_rejected_before_running() {
        let engine = TesseractEngine::new("definitely-not-a-tesseract-binary");
        let image = DynamicImage::ImageRgb8(RgbImage::new(8, 8));
        let result = engine.recognize(&image, SegmentationMode::Auto, "eng;rm");
        assert!(matches!(result, Err(OcrError::InvalidLanguage(_))));
    }
}
