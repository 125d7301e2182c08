//! Health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::pipeline::Pipeline;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub ocr_engine: &'static str,
    pub ocr_available: bool,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let pipeline = state.pipeline();

    Json(HealthResponse {
        status: "healthy",
        service: "OCR API",
        version: env!("CARGO_PKG_VERSION"),
        ocr_engine: pipeline.ocr_engine().name(),
        ocr_available: engine_available(pipeline).await,
    })
}

/// Probe the OCR engine off the async runtime; probing spawns a process
pub async fn engine_available(pipeline: &Pipeline) -> bool {
    let pipeline = pipeline.clone();
    tokio::task::spawn_blocking(move || pipeline.ocr_engine().is_available())
        .await
        .unwrap_or(false)
}
