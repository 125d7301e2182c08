//! OCR Routes
//!
//! Endpoints:
//! - POST /ocr-image/ - Extract text and tables from an image (JPEG, PNG, TIFF, BMP)
//! - POST /ocr-pdf/ - Extract text and tables from every page of a PDF
//!
//! Both take a multipart form with a single `file` field.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::pipeline::{Extraction, TableRecord};
use crate::state::AppState;
use crate::upload::{check_size, validate_content_type, DocumentKind};

/// Multipart field carrying the document
const FILE_FIELD: &str = "file";

/// Extraction result for one upload
#[derive(Debug, Serialize)]
pub struct OcrResponse {
    pub success: bool,
    pub filename: String,
    pub text: String,
    pub tables: Vec<TableRecord>,
    pub text_length: usize,
    pub table_count: usize,
}

impl OcrResponse {
    fn new(filename: String, extraction: Extraction) -> Self {
        Self {
            success: true,
            filename,
            text_length: extraction.text.chars().count(),
            table_count: extraction.tables.len(),
            text: extraction.text,
            tables: extraction.tables,
        }
    }
}

/// Create the OCR router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ocr-image/", post(ocr_image_upload))
        .route("/ocr-image", post(ocr_image_upload))
        .route("/ocr-pdf/", post(ocr_pdf_upload))
        .route("/ocr-pdf", post(ocr_pdf_upload))
}

/// POST /ocr-image/
async fn ocr_image_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OcrResponse>> {
    process_upload(state, multipart, DocumentKind::Image).await
}

/// POST /ocr-pdf/
async fn ocr_pdf_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OcrResponse>> {
    process_upload(state, multipart, DocumentKind::Pdf).await
}

struct Upload {
    filename: String,
    data: Bytes,
}

async fn process_upload(
    state: AppState,
    mut multipart: Multipart,
    kind: DocumentKind,
) -> Result<Json<OcrResponse>> {
    let max_size = state.config().upload.max_file_size;
    let upload = read_upload(&mut multipart, kind, max_size).await?;

    tracing::info!(
        filename = %upload.filename,
        bytes = upload.data.len(),
        "Processing {}",
        kind
    );

    let pipeline = state.pipeline().clone();
    let data = upload.data;

    // The pipeline is CPU-bound and calls out to external programs
    let extraction = tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Image => pipeline.process_image(&data),
        DocumentKind::Pdf => pipeline.process_pdf(&data),
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
    .map_err(|source| AppError::Processing { kind, source })?;

    Ok(Json(OcrResponse::new(upload.filename, extraction)))
}

/// Pull the `file` field out of the form, validating type before reading
/// and size after
async fn read_upload(
    multipart: &mut Multipart,
    kind: DocumentKind,
    max_size: usize,
) -> Result<Upload> {
    while let Some(field) = multipart.next_field().await.map_err(|e| upload_error(e, max_size))? {
        if field.name() != Some(FILE_FIELD) {
            tracing::debug!(name = ?field.name(), "Skipping multipart field");
            continue;
        }

        let filename = field.file_name().unwrap_or("unknown").to_string();
        validate_content_type(kind, field.content_type())?;

        let data = field.bytes().await.map_err(|e| upload_error(e, max_size))?;
        check_size(data.len(), max_size)?;

        return Ok(Upload { filename, data });
    }

    Err(AppError::MissingFile)
}

fn upload_error(error: MultipartError, max_size: usize) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge { max: max_size }
    } else {
        AppError::BadRequest(format!("Failed to read upload: {}", error.body_text()))
    }
}
