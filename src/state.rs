//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::ocr::TesseractEngine;
use crate::pdf::MupdfRasterizer;
use crate::pipeline::Pipeline;
use crate::telemetry::TracingTelemetry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    pipeline: Pipeline,
}

impl AppState {
    /// Create state around an already assembled pipeline
    pub fn new(config: Config, pipeline: Pipeline) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pipeline }),
        }
    }

    /// Wire the production collaborators: Tesseract, MuPDF and tracing
    pub fn from_config(config: Config) -> Self {
        let pipeline = Pipeline::new(
            Arc::new(TesseractEngine::new(&config.ocr.tesseract_cmd)),
            Arc::new(MupdfRasterizer::new(config.pdf.dpi)),
            Arc::new(TracingTelemetry),
            config.pipeline_config(),
        );
        Self::new(config, pipeline)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the extraction pipeline
    pub fn pipeline(&self) -> &Pipeline {
        &self.inner.pipeline
    }
}
