use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use attendance_domain::embedding::DimensionMismatch;

/// Attendance service error variants.
///
/// "Not recognized" and "no candidates" are outcomes, not errors.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("employee not found")]
    EmployeeNotFound,
    #[error("no face detected in image")]
    NoFaceDetected,
    #[error("feature extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("invalid image payload")]
    InvalidImage,
    #[error("missing data")]
    MissingData,
    #[error(transparent)]
    DimensionMismatch(#[from] DimensionMismatch),
    #[error("concurrent access event for the same employee")]
    Conflict,
    #[error("storage error")]
    Storage(#[from] anyhow::Error),
}

impl AttendanceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            Self::NoFaceDetected => "NO_FACE_DETECTED",
            Self::ExtractionFailed(_) => "EXTRACTION_FAILED",
            Self::InvalidImage => "INVALID_IMAGE",
            Self::MissingData => "MISSING_DATA",
            Self::DimensionMismatch(_) => "DIMENSION_MISMATCH",
            Self::Conflict => "CONFLICT",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl IntoResponse for AttendanceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::EmployeeNotFound => StatusCode::NOT_FOUND,
            Self::NoFaceDetected | Self::ExtractionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidImage | Self::MissingData | Self::DimensionMismatch(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Conflict => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only 5xx is logged here, with the full cause chain.
        if let Self::Storage(ref e) = self {
            tracing::error!(error = format!("{e:#}"), kind = "STORAGE_ERROR", "storage error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
