//! Geometry and tuning types for table detection

use serde::{Deserialize, Serialize};

/// Length in pixels of the bar-shaped structuring elements
pub const DEFAULT_LINE_LENGTH: u32 = 40;

/// Erode/dilate repetitions of the opening
pub const DEFAULT_OPEN_ITERATIONS: usize = 2;

/// Regions must be strictly wider than this to count as a table
pub const DEFAULT_MIN_TABLE_WIDTH: u32 = 100;

/// Regions must be strictly taller than this to count as a table
pub const DEFAULT_MIN_TABLE_HEIGHT: u32 = 100;

/// Largest structuring element the morphology backend accepts
pub const MAX_LINE_LENGTH: u32 = 511;

/// Integer pixel-space rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle enclosing all points, or `None` for an empty set
    /// or a set with negative coordinates.
    pub fn enclosing(points: &[imageproc::point::Point<i32>]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        if min_x < 0 || min_y < 0 {
            return None;
        }

        Some(Self {
            x: min_x as u32,
            y: min_y as u32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }

    /// Check that the box is non-empty and lies inside a `width`×`height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }
}

/// Tunable constants of the detector
///
/// The defaults define the accepted-region size class; changing them
/// changes which regions are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionConfig {
    /// Length of the horizontal (L×1) and vertical (1×L) bars
    pub line_length: u32,
    /// Opening iterations: erode this many times, then dilate this many times
    pub open_iterations: usize,
    /// Strict lower bound on accepted region width
    pub min_width: u32,
    /// Strict lower bound on accepted region height
    pub min_height: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            line_length: DEFAULT_LINE_LENGTH,
            open_iterations: DEFAULT_OPEN_ITERATIONS,
            min_width: DEFAULT_MIN_TABLE_WIDTH,
            min_height: DEFAULT_MIN_TABLE_HEIGHT,
        }
    }
}

impl DetectionConfig {
    /// Line length clamped to what the structuring element can represent
    pub fn effective_line_length(&self) -> u32 {
        self.line_length.clamp(1, MAX_LINE_LENGTH)
    }

    /// Whether a region passes the size filter
    pub fn accepts(&self, region: &BoundingBox) -> bool {
        region.width > self.min_width && region.height > self.min_height
    }
}
