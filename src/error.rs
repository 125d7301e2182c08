//! Error types for the OCR server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::upload::DocumentKind;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid file type. Allowed types: {}", .allowed.join(", "))]
    InvalidFileType { allowed: &'static [&'static str] },

    #[error("File too large. Maximum size: {:.1}MB", megabytes(.max))]
    FileTooLarge { max: usize },

    #[error("No file uploaded")]
    MissingFile,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Error processing {kind}: {source}")]
    Processing {
        kind: DocumentKind,
        source: PipelineError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

fn megabytes(bytes: &usize) -> f64 {
    *bytes as f64 / (1024.0 * 1024.0)
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    detail: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidFileType { .. } | AppError::MissingFile | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Processing { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match &self {
            AppError::Processing { kind, source } => {
                tracing::error!(error = ?source, "Error processing {}: {}", kind, source);
                self.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Unhandled exception: {}", msg);
                "Internal server error".to_string()
            }
            AppError::NotFound(msg) => msg.clone(),
            _ => {
                tracing::warn!(status = %status, "Rejected request: {}", self);
                self.to_string()
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            detail,
        });

        (status, body).into_response()
    }
}
