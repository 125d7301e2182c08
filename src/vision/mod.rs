//! Table-Region Detection
//!
//! Classical structuring-element pipeline that locates rectangular regions
//! with grid lines on a page image:
//!
//! ```text
//! image ─► binarize (inverted Otsu) ─► open with 40×1 / 1×40 bars
//!       ─► union of line masks ─► external contours ─► size filter
//! ```
//!
//! Every stage takes its input by reference and returns a new image, so
//! intermediate masks are owned by the caller and dropped as soon as the
//! next stage has consumed them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ocr_table_server::vision::{binarize, find_table_regions, DetectionConfig, Polarity};
//!
//! let mask = binarize(&image, Polarity::Inverted)?;
//! let boxes = find_table_regions(&mask, &DetectionConfig::default());
//! ```

mod binarize;
mod lines;
mod regions;
mod types;

pub use binarize::{binarize, denoise, PreprocessError, Polarity, DENOISE_RADIUS};
pub use lines::{detect_lines, LineMasks};
pub use regions::{
    approximate_chain, external_regions, find_table_regions, merge_line_masks,
};
pub use types::{
    BoundingBox, DetectionConfig, DEFAULT_LINE_LENGTH, DEFAULT_MIN_TABLE_HEIGHT,
    DEFAULT_MIN_TABLE_WIDTH, DEFAULT_OPEN_ITERATIONS, MAX_LINE_LENGTH,
};
