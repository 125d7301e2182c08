//! Pipeline result and configuration types

use serde::Serialize;

use crate::ocr::SegmentationMode;
use crate::vision::{BoundingBox, DetectionConfig};

/// A detected table region and the text rows read from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRecord {
    /// 1-based page number (PDF input only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    /// Region in page pixel coordinates
    pub position: BoundingBox,
    /// Non-empty text rows in reading order
    pub rows: Vec<String>,
}

/// Text and tables of one uploaded document
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    pub text: String,
    pub tables: Vec<TableRecord>,
}

/// Pipeline settings
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// OCR language passed to the engine
    pub language: String,
    /// Layout mode for whole-page text extraction
    pub text_mode: SegmentationMode,
    /// Table detector constants
    pub detection: DetectionConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            text_mode: SegmentationMode::Block,
            detection: DetectionConfig::default(),
        }
    }
}
