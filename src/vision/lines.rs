//! Line-Structure Detector
//!
//! Isolates long horizontal and vertical strokes with a morphological
//! opening. Anything shorter than the bar, such as glyphs, disappears.

use image::{GrayImage, Luma};
use imageproc::morphology::{grayscale_dilate, grayscale_erode, Mask};

use super::types::DetectionConfig;

/// Horizontal and vertical line maps of one page
#[derive(Debug, Clone)]
pub struct LineMasks {
    pub horizontal: GrayImage,
    pub vertical: GrayImage,
}

#[derive(Debug, Clone, Copy)]
enum Orientation {
    Horizontal,
    Vertical,
}

/// Bar-shaped structuring element anchored at its middle
fn bar(orientation: Orientation, length: u32) -> Mask {
    let (width, height) = match orientation {
        Orientation::Horizontal => (length, 1),
        Orientation::Vertical => (1, length),
    };
    let element = GrayImage::from_pixel(width, height, Luma([255]));
    // length <= 511, so the anchor fits in a u8
    Mask::from_image(&element, (width / 2) as u8, (height / 2) as u8)
}

/// Erode `iterations` times, then dilate `iterations` times
fn open(mask: &GrayImage, element: &Mask, iterations: usize) -> GrayImage {
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = grayscale_erode(&out, element);
    }
    for _ in 0..iterations {
        out = grayscale_dilate(&out, element);
    }
    out
}

/// Extract long horizontal and vertical strokes from an ink-as-white mask
pub fn detect_lines(mask: &GrayImage, config: &DetectionConfig) -> LineMasks {
    let length = config.effective_line_length();

    let horizontal = open(mask, &bar(Orientation::Horizontal, length), config.open_iterations);
    let vertical = open(mask, &bar(Orientation::Vertical, length), config.open_iterations);

    LineMasks {
        horizontal,
        vertical,
    }
}
