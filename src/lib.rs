//! OCR Table Server Library
//!
//! Text and table-region extraction for scanned images and PDFs.
//! The main server binary is in main.rs.
//!
//! # Modules
//!
//! - `vision`: Table-region detection (binarize, line structure, regions)
//! - `ocr`: OCR engine trait and the Tesseract engine
//! - `pdf`: PDF page rasterization via MuPDF
//! - `pipeline`: Row segmentation and image/PDF orchestration
//! - `telemetry`: Injected event sink for pipeline components
//! - `routes`: HTTP endpoints

pub mod config;
pub mod error;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod upload;
pub mod vision;
