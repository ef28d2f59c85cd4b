//! HTTP client of the PDF chat service

use crate::shared::api_utils::api_url;
use contracts::usecases::u601_pdf_chat::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, UploadPdfResponse, GET_RESPONSE_PATH,
    HEALTHCHECK_PATH, UPLOAD_FIELD_NAME, UPLOAD_PDF_PATH,
};
use gloo_net::http::{Request, Response};
use thiserror::Error;

/// Longest error body kept in [`ApiError::Status`].
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Failed to build request: {0}")]
    Request(String),
    #[error("Failed to send request: {0}")]
    Network(String),
    #[error("HTTP {status}{}", body_suffix(.body))]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

impl ApiError {
    fn status(status: u16, body: &str) -> Self {
        // FastAPI отдаёт {"detail": ...}, показываем только его
        let detail = serde_json::from_str::<ErrorResponse>(body).map(|e| e.message());
        let body = detail.as_deref().unwrap_or(body).trim();
        let body = match body.char_indices().nth(MAX_ERROR_BODY) {
            Some((cut, _)) => format!("{}…", &body[..cut]),
            None => body.to_string(),
        };
        ApiError::Status { status, body }
    }
}

async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::status(status, &body))
}

/// Upload the raw PDF as multipart form data.
///
/// Success is decided by HTTP status; a body that is not the expected JSON
/// yields an empty [`UploadPdfResponse`].
pub async fn upload_pdf(file: &web_sys::File) -> Result<UploadPdfResponse, ApiError> {
    let form_data = web_sys::FormData::new().map_err(|e| ApiError::Request(format!("{e:?}")))?;
    form_data
        .append_with_blob_and_filename(UPLOAD_FIELD_NAME, file, &file.name())
        .map_err(|e| ApiError::Request(format!("{e:?}")))?;

    let response = Request::post(&api_url(UPLOAD_PDF_PATH))
        .body(form_data)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = ensure_ok(response).await?;

    let text = response.text().await.unwrap_or_default();
    Ok(parse_upload_body(&text))
}

fn parse_upload_body(text: &str) -> UploadPdfResponse {
    serde_json::from_str(text).unwrap_or_default()
}

/// Ask a question about the current document. Returns the bot reply text.
pub async fn get_response(user_message: &str) -> Result<String, ApiError> {
    let response = Request::post(&api_url(GET_RESPONSE_PATH))
        .json(&ChatRequest::new(user_message))
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = ensure_ok(response).await?;

    let reply: ChatResponse = response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(reply.bot_reply)
}

pub async fn healthcheck() -> Result<HealthResponse, ApiError> {
    let response = Request::get(&api_url(HEALTHCHECK_PATH))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = ensure_ok(response).await?;

    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        assert_eq!(ApiError::status(500, "").to_string(), "HTTP 500");
        assert_eq!(
            ApiError::status(422, " {\"detail\":\"bad\"} ").to_string(),
            "HTTP 422: {\"detail\":\"bad\"}"
        );
    }

    #[test]
    fn test_status_error_body_is_truncated() {
        let long = "x".repeat(MAX_ERROR_BODY + 50);
        match ApiError::status(500, &long) {
            ApiError::Status { body, .. } => {
                assert_eq!(body.chars().count(), MAX_ERROR_BODY + 1);
                assert!(body.ends_with('…'));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_upload_body_is_lenient() {
        assert_eq!(parse_upload_body(""), UploadPdfResponse::default());
        assert_eq!(parse_upload_body("not json"), UploadPdfResponse::default());
        let parsed = parse_upload_body(r#"{"message":"ok","s3_url":"https://x/doc.pdf"}"#);
        assert_eq!(parsed.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_status_error_uses_detail() {
        assert_eq!(
            ApiError::status(500, r#"{"detail":"No PDF uploaded yet"}"#).to_string(),
            "HTTP 500: No PDF uploaded yet"
        );
        assert_eq!(
            ApiError::status(502, r#"{"error":"bad gateway"}"#).to_string(),
            r#"HTTP 502: {"error":"bad gateway"}"#
        );
        assert_eq!(
            ApiError::status(422, r#"{"detail":[{"msg":"field required"}]}"#).to_string(),
            r#"HTTP 422: [{"msg":"field required"}]"#
        );
    }
}
