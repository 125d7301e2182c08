//! PDF Module
//!
//! Rasterizes PDF pages so they can run through the image pipeline.

mod rasterizer;

pub use rasterizer::{MupdfRasterizer, PageRasterizer, RasterizeError, DEFAULT_DPI};

#[cfg(test)]
pub use rasterizer::MockRasterizer;
