//! PDF page rasterization via MuPDF

use image::RgbImage;
use mupdf::{Colorspace, Document, Matrix};

/// PDF user space is 72 units per inch
const POINTS_PER_INCH: f32 = 72.0;

/// Default rasterization resolution
pub const DEFAULT_DPI: u32 = 200;

/// Rasterization errors
#[derive(Debug, thiserror::Error)]
pub enum RasterizeError {
    #[error("Failed to open PDF: {0}")]
    Open(String),

    #[error("Failed to render page {page}: {message}")]
    Render { page: usize, message: String },

    #[error("Invalid pixmap for page {page}: {message}")]
    Pixmap { page: usize, message: String },
}

/// Turns a PDF into one image per page, in document order
pub trait PageRasterizer: Send + Sync {
    /// Render every page. Malformed input must be an error, never an empty list.
    fn pages_of(&self, pdf_data: &[u8]) -> Result<Vec<RgbImage>, RasterizeError>;
}

/// MuPDF-backed rasterizer
///
/// MuPDF documents are not thread-safe, so every call opens a fresh
/// document and drops it before returning.
#[derive(Debug, Clone)]
pub struct MupdfRasterizer {
    dpi: u32,
}

impl Default for MupdfRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_DPI)
    }
}

impl MupdfRasterizer {
    pub fn new(dpi: u32) -> Self {
        Self { dpi: dpi.max(1) }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    fn render_page(
        &self,
        doc: &Document,
        index: i32,
        matrix: &Matrix,
    ) -> Result<RgbImage, RasterizeError> {
        let page_number = index as usize + 1;
        let render_err = |e: mupdf::Error| RasterizeError::Render {
            page: page_number,
            message: e.to_string(),
        };

        let page = doc.load_page(index).map_err(render_err)?;
        let colorspace = Colorspace::device_rgb();
        let pixmap = page
            .to_pixmap(matrix, &colorspace, false, true)
            .map_err(render_err)?;

        pixmap_to_rgb(&pixmap, page_number)
    }
}

impl PageRasterizer for MupdfRasterizer {
    fn pages_of(&self, pdf_data: &[u8]) -> Result<Vec<RgbImage>, RasterizeError> {
        let doc = Document::from_bytes(pdf_data, "application/pdf")
            .map_err(|e| RasterizeError::Open(e.to_string()))?;
        let page_count = doc
            .page_count()
            .map_err(|e| RasterizeError::Open(e.to_string()))?;

        if page_count <= 0 {
            return Err(RasterizeError::Open("document has no pages".to_string()));
        }

        let scale = self.dpi as f32 / POINTS_PER_INCH;
        let matrix = Matrix::new_scale(scale, scale);

        (0..page_count)
            .map(|index| self.render_page(&doc, index, &matrix))
            .collect()
    }
}

fn pixmap_to_rgb(pixmap: &mupdf::Pixmap, page: usize) -> Result<RgbImage, RasterizeError> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    if n < 3 {
        return Err(RasterizeError::Pixmap {
            page,
            message: format!("expected at least 3 components, got {}", n),
        });
    }

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(255);
            let g = samples.get(offset + 1).copied().unwrap_or(255);
            let b = samples.get(offset + 2).copied().unwrap_or(255);
            rgb.extend_from_slice(&[r, g, b]);
        }
    }

    RgbImage::from_raw(width, height, rgb).ok_or_else(|| RasterizeError::Pixmap {
        page,
        message: "sample buffer does not match page size".to_string(),
    })
}

/// Rasterizer returning canned pages, or failing like a malformed PDF
#[cfg(test)]
pub struct MockRasterizer {
    pub pages: Option<Vec<RgbImage>>,
}

#[cfg(test)]
impl PageRasterizer for MockRasterizer {
    fn pages_of(&self, _pdf_data: &[u8]) -> Result<Vec<RgbImage>, RasterizeError> {
        self.pages
            .clone()
            .ok_or_else(|| RasterizeError::Open("mock: malformed document".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_pdf_is_an_error() {
        let rasterizer = MupdfRasterizer::default();
        let result = rasterizer.pages_of(b"this is not a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_truncated_pdf_is_an_error() {
        let rasterizer = MupdfRasterizer::default();
        let result = rasterizer.pages_of(b"%PDF-1.4\n1 0 obj\n<< /Type /Cat");
        assert!(result.is_err());
    }

    /// Blank PDF with one page per `(width, height)` MediaBox, in points
    fn blank_pdf(pages: &[(u32, u32)]) -> Vec<u8> {
        let first_page = 3;
        let kids: Vec<String> = (0..pages.len())
            .map(|i| format!("{} 0 R", first_page + i))
            .collect();

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                pages.len()
            ),
        ];
        for (width, height) in pages {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << >> >>",
                width, height
            ));
        }

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_pages_rendered_in_order_at_dpi() {
        // 72pt = 1in = 200px at the default DPI
        let pdf = blank_pdf(&[(72, 36), (36, 72)]);
        let pages = MupdfRasterizer::default().pages_of(&pdf).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].dimensions(), (200, 100));
        assert_eq!(pages[1].dimensions(), (100, 200));
        assert!(pages[0].pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_custom_dpi_scales_pages() {
        let pdf = blank_pdf(&[(144, 72)]);
        let pages = MupdfRasterizer::new(72).pages_of(&pdf).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].dimensions(), (144, 72));
    }

    #[test]
    fn test_dpi_never_zero() {
        assert_eq!(MupdfRasterizer::new(0).dpi(), 1);
        assert_eq!(MupdfRasterizer::default().dpi(), DEFAULT_DPI);
    }
}
