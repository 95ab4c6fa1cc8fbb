//! Request handlers for the slip OCR service.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::AppState;
use crate::response::{ApiError, HealthResponse, OcrResponse};

pub const SERVICE_NAME: &str = "Thai Slip OCR Service";

/// `GET /` - service info and endpoint listing.
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "status": "running",
        "endpoints": {
            "/health": "Health check",
            "/ocr": "POST - Run OCR and field extraction on a slip image",
        },
    }))
}

/// `GET /health` - readiness check. The engine is constructed at startup,
/// so once the service answers at all the OCR path is ready.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        ocr_ready: true,
    })
}

#[derive(Deserialize)]
struct Base64Payload {
    image_base64: String,
}

/// `POST /ocr` - accept a slip image as a multipart `image`/`file` field or
/// as `{"image_base64": ...}` JSON, run OCR, and return the recognized text
/// plus the heuristically extracted fields.
pub async fn ocr(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> Result<Json<OcrResponse>, ApiError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let image_bytes = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| ApiError::InvalidPayload(e.to_string()))?;
        read_image_field(multipart).await?
    } else {
        let body = Bytes::from_request(req, &())
            .await
            .map_err(|e| ApiError::InvalidPayload(e.to_string()))?;
        let payload: Base64Payload =
            serde_json::from_slice(&body).map_err(|_| ApiError::MissingImage)?;
        decode_base64_image(&payload.image_base64)?
    };

    info!("Processing OCR for image: {} bytes", image_bytes.len());

    let image =
        image::load_from_memory(&image_bytes).map_err(|e| ApiError::InvalidImage(e.to_string()))?;

    // OCR is CPU-bound; keep it off the async workers.
    let engine_state = Arc::clone(&state);
    let scan = tokio::task::spawn_blocking(move || engine_state.engine.process(&image))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    let lines = scan.lines_above(state.confidence_threshold);
    let fields = state.extractor.extract(&lines);
    let text = lines.join("\n");
    let characters = text.chars().count();

    info!(
        "OCR completed. Found {} lines, {} characters",
        lines.len(),
        characters
    );

    Ok(Json(OcrResponse {
        success: true,
        text,
        lines: lines.len(),
        characters,
        fields,
    }))
}

async fn read_image_field(mut multipart: Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidPayload(e.to_string()))?
    {
        if matches!(field.name(), Some("image") | Some("file")) {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidPayload(e.to_string()))?;
            if data.is_empty() {
                return Err(ApiError::MissingImage);
            }
            return Ok(data.to_vec());
        }
    }

    Err(ApiError::MissingImage)
}

/// Decode a base64 image payload, tolerating a data-URL prefix such as
/// `data:image/png;base64,`.
fn decode_base64_image(encoded: &str) -> Result<Vec<u8>, ApiError> {
    let encoded = match encoded.split_once(',') {
        Some((_, rest)) => rest,
        None => encoded,
    };

    BASE64
        .decode(encoded.trim())
        .map_err(|e| ApiError::InvalidPayload(format!("invalid base64 image: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_plain_base64() {
        assert_eq!(decode_base64_image("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_strips_data_url_prefix() {
        let encoded = "data:image/png;base64,aGVsbG8=";
        assert_eq!(decode_base64_image(encoded).unwrap(), b"hello");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_base64_image("not base64!!").is_err());
    }
}
