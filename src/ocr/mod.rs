//! OCR Module
//!
//! Text recognition collaborators used by the extraction pipeline.
//!
//! The pipeline only depends on the [`OcrEngine`] trait; the production
//! engine shells out to the `tesseract` executable, which must be installed
//! and available in PATH (or configured via `TESSERACT_CMD`).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ocr_table_server::ocr::{OcrEngine, SegmentationMode, TesseractEngine};
//!
//! let engine = TesseractEngine::default();
//! if engine.is_available() {
//!     let text = engine.recognize(&image, SegmentationMode::Block, "eng")?;
//! }
//! ```

mod provider;
mod types;

pub use provider::{OcrEngine, TesseractEngine};
pub use types::{OcrError, SegmentationMode};

#[cfg(test)]
pub use provider::MockEngine;
