//! Pipeline error types

use thiserror::Error;

use crate::ocr::OcrError;
use crate::pdf::RasterizeError;

/// Unrecoverable failures of a whole-document extraction
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input bytes could not be parsed as an image
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Input bytes could not be turned into page images
    #[error("Failed to rasterize PDF: {0}")]
    Rasterize(#[from] RasterizeError),

    /// The OCR engine failed
    #[error(transparent)]
    Ocr(#[from] OcrError),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
