use serde::{Deserialize, Serialize};

/// Reply of `POST /get_response`. Only `bot_reply` is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub bot_reply: String,
}

/// Reply of `POST /upload_pdf`.
///
/// The upload is judged by HTTP status alone; the body is informational and
/// every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPdfResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub s3_url: Option<String>,
}

/// Reply of `GET /healthcheck`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// FastAPI error body: `{"detail": ...}`.
///
/// `detail` is a string for `HTTPException`, a list of objects for
/// validation errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_response_ignores_unknown_fields() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"bot_reply":"It's about X.","extra":1}"#).unwrap();
        assert_eq!(resp.bot_reply, "It's about X.");
    }

    #[test]
    fn upload_response_tolerates_missing_fields() {
        let resp: UploadPdfResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp, UploadPdfResponse::default());

        let resp: UploadPdfResponse = serde_json::from_str(
            r#"{"message":"PDF 'doc.pdf' uploaded","s3_url":"https://b.s3.r.amazonaws.com/doc_123456.pdf"}"#,
        )
        .unwrap();
        assert_eq!(resp.message.as_deref(), Some("PDF 'doc.pdf' uploaded"));
        assert!(resp.s3_url.is_some());
    }

    #[test]
    fn health_status_is_case_insensitive() {
        assert!(HealthResponse { status: "OK".into() }.is_ok());
        assert!(!HealthResponse { status: "degraded".into() }.is_ok());
    }

    #[test]
    fn error_detail_string_and_list() {
        let err: ErrorResponse = serde_json::from_str(r#"{"detail":"No PDF uploaded"}"#).unwrap();
        assert_eq!(err.message(), "No PDF uploaded");

        let err: ErrorResponse =
            serde_json::from_str(r#"{"detail":[{"msg":"field required"}]}"#).unwrap();
        assert_eq!(err.message(), r#"[{"msg":"field required"}]"#);

        assert!(serde_json::from_str::<ErrorResponse>(r#"{"error":"x"}"#).is_err());
    }
}
