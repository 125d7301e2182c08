//! OCR Types

use std::fmt;
use std::str::FromStr;

/// Page layout analysis requested from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationMode {
    /// Fully automatic page segmentation
    Auto,
    /// Treat the image as a single uniform block of text
    Block,
}

impl SegmentationMode {
    /// Tesseract `--psm` value
    pub fn psm(self) -> u8 {
        match self {
            Self::Auto => 3,
            Self::Block => 6,
        }
    }
}

impl Default for SegmentationMode {
    fn default() -> Self {
        Self::Block
    }
}

impl fmt::Display for SegmentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Block => write!(f, "block"),
        }
    }
}

impl FromStr for SegmentationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "3" => Ok(Self::Auto),
            "block" | "6" => Ok(Self::Block),
            other => Err(format!("unknown segmentation mode: {}", other)),
        }
    }
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("Failed to prepare image for OCR: {0}")]
    ImageEncoding(String),

    #[error("OCR processing failed: {0}")]
    ProcessingError(String),

    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),
}
