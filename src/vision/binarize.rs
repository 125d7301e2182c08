//! Binarizer
//!
//! Global Otsu thresholding of the intensity channel. Pixels strictly above
//! the level are "above"; the polarity decides whether those become white
//! (paper) or black.

use image::{DynamicImage, GrayImage};
use imageproc::contrast::otsu_level;
use imageproc::filter::median_filter;

/// Radius of the speckle filter applied after direct thresholding
pub const DENOISE_RADIUS: u32 = 1;

/// Which side of the threshold maps to white
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Above the level → 255. Dark text stays dark on white paper.
    Direct,
    /// Above the level → 0. Ink becomes the (white) foreground.
    Inverted,
}

/// Binarization errors
#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    #[error("Cannot threshold an empty image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Convert to intensity and threshold at the Otsu level
pub fn binarize(image: &DynamicImage, polarity: Polarity) -> Result<GrayImage, PreprocessError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(PreprocessError::EmptyImage { width, height });
    }

    let mut mask = image.to_luma8();
    let first = mask.get_pixel(0, 0).0[0];
    // A single-valued histogram has no separating level
    let level = if mask.pixels().all(|p| p.0[0] == first) {
        0
    } else {
        otsu_level(&mask)
    };

    let (above, below) = match polarity {
        Polarity::Direct => (255u8, 0u8),
        Polarity::Inverted => (0u8, 255u8),
    };

    for pixel in mask.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > level { above } else { below };
    }

    Ok(mask)
}

/// Edge-preserving removal of isolated speckles
pub fn denoise(mask: &GrayImage) -> GrayImage {
    median_filter(mask, DENOISE_RADIUS, DENOISE_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};

    fn two_tone() -> DynamicImage {
        // Light paper with a dark block in the middle
        let img = RgbImage::from_fn(40, 30, |x, y| {
            if (10..30).contains(&x) && (10..20).contains(&y) {
                Rgb([30, 30, 40])
            } else {
                Rgb([230, 225, 220])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_direct_polarity() {
        let mask = binarize(&two_tone(), Polarity::Direct).unwrap();
        assert_eq!(mask.get_pixel(0, 0), &Luma([255]));
        assert_eq!(mask.get_pixel(15, 15), &Luma([0]));
    }

    #[test]
    fn test_inverted_polarity() {
        let mask = binarize(&two_tone(), Polarity::Inverted).unwrap();
        assert_eq!(mask.get_pixel(0, 0), &Luma([0]));
        assert_eq!(mask.get_pixel(15, 15), &Luma([255]));
    }

    #[test]
    fn test_output_is_two_valued() {
        let gradient = GrayImage::from_fn(64, 16, |x, _| Luma([(x * 4) as u8]));
        let mask = binarize(&DynamicImage::ImageLuma8(gradient), Polarity::Direct).unwrap();
        assert!(mask.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_second_pass_is_noop() {
        let gradient = GrayImage::from_fn(64, 16, |x, y| Luma([((x * 3 + y * 5) % 256) as u8]));
        let first = binarize(&DynamicImage::ImageLuma8(gradient), Polarity::Direct).unwrap();
        let second = binarize(&DynamicImage::ImageLuma8(first.clone()), Polarity::Direct).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_blank_page_has_no_ink() {
        let blank = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 50, Rgb([255, 255, 255])));
        let mask = binarize(&blank, Polarity::Inverted).unwrap();
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_empty_image_is_an_error() {
        let empty = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        assert!(matches!(
            binarize(&empty, Polarity::Direct),
            Err(PreprocessError::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_denoise_removes_speckle() {
        let mut mask = GrayImage::from_pixel(20, 20, Luma([255]));
        mask.put_pixel(10, 10, Luma([0]));
        let cleaned = denoise(&mask);
        assert_eq!(cleaned.get_pixel(10, 10), &Luma([255]));
    }
}
