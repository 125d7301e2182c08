//! Upload constraints
//!
//! Size and MIME checks applied before a file reaches the pipeline.

use std::fmt;

use crate::error::AppError;

/// Maximum file size: 10MB
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Accepted raster image MIME types
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/tiff",
    "image/bmp",
];

/// Accepted PDF MIME types
pub const ALLOWED_PDF_TYPES: &[&str] = &["application/pdf"];

/// Which endpoint an upload arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Image,
    Pdf,
}

impl DocumentKind {
    pub fn allowed_types(self) -> &'static [&'static str] {
        match self {
            Self::Image => ALLOWED_IMAGE_TYPES,
            Self::Pdf => ALLOWED_PDF_TYPES,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Pdf => write!(f, "PDF"),
        }
    }
}

/// Check the declared MIME type against the endpoint's allow-list
///
/// Parameters such as `; charset=...` are ignored.
pub fn validate_content_type(kind: DocumentKind, content_type: Option<&str>) -> Result<(), AppError> {
    let allowed = kind.allowed_types();
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());

    match essence {
        Some(ct) if allowed.contains(&ct.as_str()) => Ok(()),
        _ => Err(AppError::InvalidFileType { allowed }),
    }
}

/// Reject payloads larger than `max` bytes
pub fn check_size(len: usize, max: usize) -> Result<(), AppError> {
    if len > max {
        return Err(AppError::FileTooLarge { max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_types() {
        for ct in ["image/jpeg", "image/jpg", "image/png", "image/tiff", "image/bmp"] {
            assert!(validate_content_type(DocumentKind::Image, Some(ct)).is_ok(), "{}", ct);
        }
        assert!(validate_content_type(DocumentKind::Image, Some("IMAGE/PNG")).is_ok());
        assert!(validate_content_type(DocumentKind::Image, Some("image/gif")).is_err());
        assert!(validate_content_type(DocumentKind::Image, Some("application/pdf")).is_err());
        assert!(validate_content_type(DocumentKind::Image, None).is_err());
    }

    #[test]
    fn test_pdf_types() {
        assert!(validate_content_type(DocumentKind::Pdf, Some("application/pdf")).is_ok());
        assert!(validate_content_type(DocumentKind::Pdf, Some("application/pdf; charset=binary")).is_ok());
        assert!(matches!(
            validate_content_type(DocumentKind::Pdf, Some("image/png")),
            Err(AppError::InvalidFileType { .. })
        ));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(check_size(MAX_FILE_SIZE, MAX_FILE_SIZE).is_ok());
        assert!(matches!(
            check_size(MAX_FILE_SIZE + 1, MAX_FILE_SIZE),
            Err(AppError::FileTooLarge { max: MAX_FILE_SIZE })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = validate_content_type(DocumentKind::Pdf, Some("text/plain")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid file type. Allowed types: application/pdf");

        let err = check_size(MAX_FILE_SIZE + 1, MAX_FILE_SIZE).unwrap_err();
        assert_eq!(err.to_string(), "File too large. Maximum size: 10.0MB");
    }
}
