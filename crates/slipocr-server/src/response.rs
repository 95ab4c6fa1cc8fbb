//! Response envelopes and error-to-status mapping for the HTTP boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use slipocr_core::{OcrError, SlipFields};

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub ocr_ready: bool,
}

/// Response body for `POST /ocr`.
#[derive(Debug, Serialize)]
pub struct OcrResponse {
    pub success: bool,
    /// Confidence-filtered recognized lines, joined with newlines.
    pub text: String,
    /// Number of recognized lines after confidence filtering.
    pub lines: usize,
    /// Character count of `text`.
    pub characters: usize,
    /// Heuristically extracted slip fields (absent fields are null).
    pub fields: SlipFields,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

/// Request-level failures, mapped to HTTP status codes at the boundary
/// instead of bubbling as panics or opaque 500s.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no image provided; send an \"image\" form field or \"image_base64\" in JSON")]
    MissingImage,

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("invalid request payload: {0}")]
    InvalidPayload(String),

    #[error("OCR processing failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingImage | Self::InvalidImage(_) | Self::InvalidPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Ocr(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            success: false,
            error: self.to_string(),
        });
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_client_errors_map_to_400() {
        assert_eq!(ApiError::MissingImage.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidImage("bad png".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_ocr_failure_maps_to_500() {
        let err = ApiError::Ocr(OcrError::Recognition("model crashed".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_ocr_response_serializes_absent_fields_as_null() {
        let response = OcrResponse {
            success: true,
            text: String::new(),
            lines: 0,
            characters: 0,
            fields: SlipFields::default(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], serde_json::Value::Bool(true));
        assert_eq!(json["fields"]["amount"], serde_json::Value::Null);
        assert_eq!(json["fields"]["from_account"], serde_json::Value::Null);
    }
}
