//! Extraction Pipeline
//!
//! Ties the vision stages, the OCR engine and the PDF rasterizer together.
//!
//! ```text
//! bytes ─► decode ──────────────┬─► binarize ─► denoise ─► OCR ─► text
//!                               └─► table regions ─► crop ─► OCR ─► rows
//! pdf ───► rasterize ─► pages ─► (per page, in order) ─► same as above
//! ```

mod error;
mod rows;
mod service;
mod types;

pub use error::{PipelineError, Result};
pub use rows::{extract_rows, split_rows};
pub use service::Pipeline;
pub use types::{Extraction, PipelineConfig, TableRecord};
