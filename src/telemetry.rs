//! Pipeline telemetry
//!
//! Components report what happened through a [`Telemetry`] handle they are
//! given, instead of writing to a process-wide logger. The server wires in
//! [`TracingTelemetry`]; tests use [`MemoryTelemetry`] to assert on events.

use parking_lot::Mutex;

use crate::pipeline::PipelineError;
use crate::vision::PreprocessError;

/// Which extraction pass a page event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Text,
    Tables,
}

/// Something observable happened inside the pipeline
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    /// Binarization failed; OCR continues on the unprocessed image
    PreprocessFallback { error: &'a PreprocessError },
    /// Single-image text extraction finished
    TextExtracted { characters: usize },
    /// A PDF page is about to be processed
    PageStarted { pass: Pass, page: usize, total: usize },
    /// PDF text extraction finished
    PdfTextExtracted { characters: usize, pages: usize },
    /// Tables found on one PDF page (only reported when non-zero)
    PageTables { page: usize, count: usize },
    /// Table detection over a whole document finished
    TablesDetected { count: usize },
    /// Table detection failed; the document reports no tables
    TableExtractionFailed { error: &'a PipelineError },
}

/// Sink for pipeline events
pub trait Telemetry: Send + Sync {
    fn record(&self, event: PipelineEvent<'_>);
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetry;

impl Telemetry for TracingTelemetry {
    fn record(&self, event: PipelineEvent<'_>) {
        match event {
            PipelineEvent::PreprocessFallback { error } => {
                tracing::warn!(error = %error, "Preprocessing failed, using original image");
            }
            PipelineEvent::TextExtracted { characters } => {
                tracing::info!(characters, "OCR completed");
            }
            PipelineEvent::PageStarted { pass, page, total } => {
                tracing::info!(?pass, page, total, "Processing page {}/{}", page, total);
            }
            PipelineEvent::PdfTextExtracted { characters, pages } => {
                tracing::info!(characters, pages, "PDF OCR completed");
            }
            PipelineEvent::PageTables { page, count } => {
                tracing::info!(page, count, "Found {} tables on page {}", count, page);
            }
            PipelineEvent::TablesDetected { count } => {
                tracing::info!(count, "Detected {} tables", count);
            }
            PipelineEvent::TableExtractionFailed { error } => {
                tracing::error!(error = %error, "Error extracting tables");
            }
        }
    }
}

/// Keeps a one-line rendering of every event
#[derive(Debug, Default)]
pub struct MemoryTelemetry {
    events: Mutex<Vec<String>>,
}

impl MemoryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first
    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    /// Whether any recorded event starts with `prefix`
    pub fn contains(&self, prefix: &str) -> bool {
        self.events.lock().iter().any(|e| e.starts_with(prefix))
    }
}

impl Telemetry for MemoryTelemetry {
    fn record(&self, event: PipelineEvent<'_>) {
        let line = match event {
            PipelineEvent::PreprocessFallback { error } => format!("preprocess_fallback: {}", error),
            PipelineEvent::TextExtracted { characters } => format!("text_extracted: {}", characters),
            PipelineEvent::PageStarted { pass, page, total } => {
                format!("page_started: {:?} {}/{}", pass, page, total)
            }
            PipelineEvent::PdfTextExtracted { characters, pages } => {
                format!("pdf_text_extracted: {} chars, {} pages", characters, pages)
            }
            PipelineEvent::PageTables { page, count } => format!("page_tables: {} on {}", count, page),
            PipelineEvent::TablesDetected { count } => format!("tables_detected: {}", count),
            PipelineEvent::TableExtractionFailed { error } => {
                format!("table_extraction_failed: {}", error)
            }
        };
        self.events.lock().push(line);
    }
}
