//! Row Segmenter
//!
//! Reads the text inside one accepted region and splits it into rows.

use image::DynamicImage;

use crate::ocr::{OcrEngine, OcrError, SegmentationMode};
use crate::vision::BoundingBox;

/// Split OCR output on line breaks, trimming each line and dropping blanks
pub fn split_rows(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(str::to_string)
        .collect()
}

/// OCR the original pixels inside `region` as one uniform text block
///
/// An empty result means the region carries no text and must not be
/// reported as a table.
pub fn extract_rows(
    ocr: &dyn OcrEngine,
    image: &DynamicImage,
    region: &BoundingBox,
    language: &str,
) -> Result<Vec<String>, OcrError> {
    let crop = image.crop_imm(region.x, region.y, region.width, region.height);
    let text = ocr.recognize(&crop, SegmentationMode::Block, language)?;
    Ok(split_rows(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_rows_trims_and_drops_blanks() {
        let text = "  Name   Qty \n\n\t\nApples  3\r\nPears 5  \n\u{c}";
        assert_eq!(split_rows(text), vec!["Name   Qty", "Apples  3", "Pears 5"]);
    }

    #[test]
    fn test_split_rows_of_whitespace_is_empty() {
        assert!(split_rows("").is_empty());
        assert!(split_rows(" \n \n\u{c}").is_empty());
    }

    #[test]
    fn test_split_rows_preserves_order() {
        assert_eq!(split_rows("b\na\nc"), vec!["b", "a", "c"]);
    }
}
