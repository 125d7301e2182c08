//! Region Extractor
//!
//! Merges the two line maps and reports the bounding boxes of the outermost
//! connected components that are large enough to be a table.

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;

use super::lines::{detect_lines, LineMasks};
use super::types::{BoundingBox, DetectionConfig};

/// Pixel-wise saturating sum of the horizontal and vertical maps
pub fn merge_line_masks(lines: &LineMasks) -> GrayImage {
    let (width, height) = lines.horizontal.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let h = lines.horizontal.get_pixel(x, y).0[0];
        let v = lines.vertical.get_pixel(x, y).0[0];
        Luma([h.saturating_add(v)])
    })
}

/// Drop boundary points that lie on a straight run between their neighbours
///
/// Horizontal, vertical and diagonal segments collapse to their end points,
/// so a rectangle border reduces to its four corners.
pub fn approximate_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    points
        .iter()
        .enumerate()
        .filter(|&(i, p)| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            (p.x - prev.x, p.y - prev.y) != (next.x - p.x, next.y - p.y)
        })
        .map(|(_, p)| *p)
        .collect()
}

/// Bounding boxes of the outer borders of top-level components
///
/// Boxes come out in contour discovery order. Nested or overlapping
/// components are not merged. Pixels outside the image count as
/// background, so components touching the frame still get an outer border.
pub fn external_regions(mask: &GrayImage) -> Vec<BoundingBox> {
    let padded = pad_with_background(mask);

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|contour| matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none())
        .filter_map(|contour| {
            let points: Vec<Point<i32>> = approximate_chain(&contour.points)
                .into_iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            BoundingBox::enclosing(&points)
        })
        .collect()
}

/// Copy of `mask` inside a one-pixel frame of zeros
fn pad_with_background(mask: &GrayImage) -> GrayImage {
    let (width, height) = mask.dimensions();
    GrayImage::from_fn(width + 2, height + 2, |x, y| {
        if x == 0 || y == 0 || x > width || y > height {
            Luma([0])
        } else {
            *mask.get_pixel(x - 1, y - 1)
        }
    })
}

/// Candidate table regions on an ink-as-white mask
pub fn find_table_regions(mask: &GrayImage, config: &DetectionConfig) -> Vec<BoundingBox> {
    let lines = detect_lines(mask, config);
    let table_mask = merge_line_masks(&lines);

    external_regions(&table_mask)
        .into_iter()
        .filter(|region| config.accepts(region))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
    use imageproc::rect::Rect;

    fn grid(mask: &mut GrayImage, x: i32, y: i32, width: u32, height: u32) {
        for inset in 0..3 {
            draw_hollow_rect_mut(
                mask,
                Rect::at(x + inset, y + inset).of_size(width - 2 * inset as u32, height - 2 * inset as u32),
                Luma([255]),
            );
        }
    }

    #[test]
    fn test_merge_saturates() {
        let lines = LineMasks {
            horizontal: GrayImage::from_pixel(4, 4, Luma([200])),
            vertical: GrayImage::from_pixel(4, 4, Luma([100])),
        };
        let merged = merge_line_masks(&lines);
        assert!(merged.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_rectangle_border_reduces_to_corners() {
        let mut points = Vec::new();
        for x in 0..10 {
            points.push(Point::new(x, 0));
        }
        for y in 1..6 {
            points.push(Point::new(9, y));
        }
        for x in (0..9).rev() {
            points.push(Point::new(x, 5));
        }
        for y in (1..5).rev() {
            points.push(Point::new(0, y));
        }

        let corners = approximate_chain(&points);

        assert_eq!(corners.len(), 4);
        assert!(corners.contains(&Point::new(0, 0)));
        assert!(corners.contains(&Point::new(9, 0)));
        assert!(corners.contains(&Point::new(9, 5)));
        assert!(corners.contains(&Point::new(0, 5)));
    }

    #[test]
    fn test_external_regions_skip_holes_and_children() {
        let mut mask = GrayImage::new(200, 200);
        draw_hollow_rect_mut(&mut mask, Rect::at(10, 10).of_size(150, 150), Luma([255]));
        // Component nested inside the outer frame
        draw_filled_rect_mut(&mut mask, Rect::at(50, 50).of_size(20, 20), Luma([255]));

        let regions = external_regions(&mask);

        assert_eq!(regions, vec![BoundingBox::new(10, 10, 150, 150)]);
    }

    #[test]
    fn test_find_table_regions_filters_small_boxes() {
        let mut mask = GrayImage::new(400, 300);
        grid(&mut mask, 20, 20, 220, 160);
        // 80×80 box: lines survive the opening but fail the size filter
        grid(&mut mask, 280, 40, 80, 80);

        let regions = find_table_regions(&mask, &DetectionConfig::default());

        assert_eq!(regions.len(), 1);
        let region = regions[0];
        assert!(region.width > 100 && region.height > 100);
        assert!(region.fits_within(400, 300));
        assert!((region.x as i32 - 20).abs() <= 2);
        assert!((region.y as i32 - 20).abs() <= 2);
        assert!((region.width as i32 - 220).abs() <= 2);
        assert!((region.height as i32 - 160).abs() <= 2);
    }

    #[test]
    fn test_frame_flush_with_image_edge() {
        let mut mask = GrayImage::new(300, 200);
        grid(&mut mask, 0, 0, 300, 200);

        assert_eq!(external_regions(&mask), vec![BoundingBox::new(0, 0, 300, 200)]);
    }

    #[test]
    fn test_grid_at_left_edge_is_one_table() {
        let mut mask = GrayImage::new(400, 300);
        // 2x2 cells of 150x130, rules starting at column 0
        for x in [0, 150, 300] {
            draw_filled_rect_mut(&mut mask, Rect::at(x, 0).of_size(3, 263), Luma([255]));
        }
        for y in [0, 130, 260] {
            draw_filled_rect_mut(&mut mask, Rect::at(0, y).of_size(303, 3), Luma([255]));
        }

        let regions = find_table_regions(&mask, &DetectionConfig::default());

        assert_eq!(regions.len(), 1, "{:?}", regions);
        let region = regions[0];
        assert!(region.x <= 2);
        assert!((region.width as i32 - 303).abs() <= 4);
        assert!((region.height as i32 - 263).abs() <= 4);
        assert!(region.fits_within(400, 300));
    }

    #[test]
    fn test_blank_mask_has_no_regions() {
        let mask = GrayImage::new(300, 300);
        assert!(find_table_regions(&mask, &DetectionConfig::default()).is_empty());
    }

    #[test]
    fn test_text_without_rules_is_not_a_table() {
        let mut mask = GrayImage::new(300, 300);
        for row in 0..8 {
            for col in 0..10 {
                draw_filled_rect_mut(
                    &mut mask,
                    Rect::at(20 + col * 25, 20 + row * 30).of_size(14, 18),
                    Luma([255]),
                );
            }
        }
        assert!(find_table_regions(&mask, &DetectionConfig::default()).is_empty());
    }
}
