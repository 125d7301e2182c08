//! Extraction Pipeline
//!
//! Orchestrates decoding, preprocessing, OCR and table detection for single
//! images and multi-page PDFs.
//!
//! Text extraction propagates unrecoverable failures. Table detection is
//! best-effort: any failure is reported to telemetry and the document
//! reports no tables.

use std::sync::Arc;

use image::DynamicImage;

use super::error::Result;
use super::rows::extract_rows;
use super::types::{Extraction, PipelineConfig, TableRecord};
use crate::ocr::OcrEngine;
use crate::pdf::PageRasterizer;
use crate::telemetry::{Pass, PipelineEvent, Telemetry};
use crate::vision::{binarize, denoise, find_table_regions, Polarity};

/// Text and table extraction over injected collaborators
///
/// Holds no mutable state; clones share the collaborators and can run on
/// any number of threads at once.
#[derive(Clone)]
pub struct Pipeline {
    ocr: Arc<dyn OcrEngine>,
    rasterizer: Arc<dyn PageRasterizer>,
    telemetry: Arc<dyn Telemetry>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        ocr: Arc<dyn OcrEngine>,
        rasterizer: Arc<dyn PageRasterizer>,
        telemetry: Arc<dyn Telemetry>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            ocr,
            rasterizer,
            telemetry,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn ocr_engine(&self) -> &dyn OcrEngine {
        self.ocr.as_ref()
    }

    /// Decode JPEG/PNG/TIFF/BMP bytes into an RGB image
    pub fn decode(data: &[u8]) -> Result<DynamicImage> {
        let image = image::load_from_memory(data)?;
        Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
    }

    // ------------------------------------------------------------------
    // Single images
    // ------------------------------------------------------------------

    /// Extract the text of an image file
    pub fn ocr_image(&self, data: &[u8]) -> Result<String> {
        let image = Self::decode(data)?;
        self.image_text(&image)
    }

    /// Detect tables in an image file. Never fails.
    pub fn extract_tables_from_image(&self, data: &[u8]) -> Vec<TableRecord> {
        let tables = Self::decode(data).and_then(|image| self.detect_tables(&image, None));
        self.settle_tables(tables)
    }

    /// Text and tables of an image file, decoding it once
    pub fn process_image(&self, data: &[u8]) -> Result<Extraction> {
        let image = Self::decode(data)?;
        let text = self.image_text(&image)?;
        let tables = self.settle_tables(self.detect_tables(&image, None));
        Ok(Extraction { text, tables })
    }

    fn image_text(&self, image: &DynamicImage) -> Result<String> {
        let text = self.recognize_text(image, true)?;
        self.telemetry.record(PipelineEvent::TextExtracted {
            characters: text.chars().count(),
        });
        Ok(text)
    }

    // ------------------------------------------------------------------
    // PDFs
    // ------------------------------------------------------------------

    /// Extract the text of every page of a PDF, with page headers
    pub fn ocr_pdf(&self, data: &[u8]) -> Result<String> {
        let pages = self.rasterize(data)?;
        self.pdf_text(&pages)
    }

    /// Detect tables on every page of a PDF. Never fails.
    pub fn extract_tables_from_pdf(&self, data: &[u8]) -> Vec<TableRecord> {
        let tables = self.rasterize(data).and_then(|pages| self.pdf_tables(&pages));
        self.settle_tables(tables)
    }

    /// Text and tables of a PDF, rasterizing it once
    pub fn process_pdf(&self, data: &[u8]) -> Result<Extraction> {
        let pages = self.rasterize(data)?;
        let text = self.pdf_text(&pages)?;
        let tables = self.settle_tables(self.pdf_tables(&pages));
        Ok(Extraction { text, tables })
    }

    fn rasterize(&self, data: &[u8]) -> Result<Vec<DynamicImage>> {
        let pages = self.rasterizer.pages_of(data)?;
        Ok(pages.into_iter().map(DynamicImage::ImageRgb8).collect())
    }

    fn pdf_text(&self, pages: &[DynamicImage]) -> Result<String> {
        let total = pages.len();
        let mut sections = Vec::with_capacity(total);

        for (index, image) in pages.iter().enumerate() {
            let page = index + 1;
            self.telemetry.record(PipelineEvent::PageStarted {
                pass: Pass::Text,
                page,
                total,
            });
            let text = self.recognize_text(image, false)?;
            sections.push(format!("--- Page {} ---\n{}\n", page, text));
        }

        let full_text = sections.join("\n");
        self.telemetry.record(PipelineEvent::PdfTextExtracted {
            characters: full_text.chars().count(),
            pages: total,
        });
        Ok(full_text)
    }

    fn pdf_tables(&self, pages: &[DynamicImage]) -> Result<Vec<TableRecord>> {
        let total = pages.len();
        let mut all_tables = Vec::new();

        for (index, image) in pages.iter().enumerate() {
            let page = index + 1;
            self.telemetry.record(PipelineEvent::PageStarted {
                pass: Pass::Tables,
                page,
                total,
            });
            let page_tables = self.detect_tables(image, Some(page))?;
            if !page_tables.is_empty() {
                self.telemetry.record(PipelineEvent::PageTables {
                    page,
                    count: page_tables.len(),
                });
                all_tables.extend(page_tables);
            }
        }

        Ok(all_tables)
    }

    // ------------------------------------------------------------------
    // Building blocks
    // ------------------------------------------------------------------

    /// Binarize (optionally denoise) and OCR a whole page, trimmed
    ///
    /// A failed binarization falls back to the unprocessed image.
    pub fn recognize_text(&self, image: &DynamicImage, with_denoise: bool) -> Result<String> {
        let prepared = match binarize(image, Polarity::Direct) {
            Ok(mask) if with_denoise => DynamicImage::ImageLuma8(denoise(&mask)),
            Ok(mask) => DynamicImage::ImageLuma8(mask),
            Err(error) => {
                self.telemetry
                    .record(PipelineEvent::PreprocessFallback { error: &error });
                image.clone()
            }
        };

        let text = self
            .ocr
            .recognize(&prepared, self.config.text_mode, &self.config.language)?;
        Ok(text.trim().to_string())
    }

    /// Find table regions on one page image and read their rows
    ///
    /// Regions whose OCR yields no text are dropped. An OCR failure in any
    /// region fails the whole page.
    pub fn detect_tables(&self, image: &DynamicImage, page: Option<usize>) -> Result<Vec<TableRecord>> {
        let mask = match binarize(image, Polarity::Inverted) {
            Ok(mask) => mask,
            // A zero-area page has nothing to segment
            Err(_) => return Ok(Vec::new()),
        };
        let regions = find_table_regions(&mask, &self.config.detection);

        let mut tables = Vec::new();
        for position in regions {
            let rows = extract_rows(self.ocr.as_ref(), image, &position, &self.config.language)?;
            if !rows.is_empty() {
                tables.push(TableRecord {
                    page,
                    position,
                    rows,
                });
            }
        }

        Ok(tables)
    }

    /// Turn a table pass result into the list reported to the caller
    fn settle_tables(&self, tables: Result<Vec<TableRecord>>) -> Vec<TableRecord> {
        match tables {
            Ok(tables) => {
                self.telemetry
                    .record(PipelineEvent::TablesDetected { count: tables.len() });
                tables
            }
            Err(error) => {
                self.telemetry
                    .record(PipelineEvent::TableExtractionFailed { error: &error });
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("ocr", &self.ocr.name())
            .field("config", &self.config)
            .finish()
    }
}
