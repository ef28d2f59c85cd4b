pub mod request;
pub mod response;

pub use request::ChatRequest;
pub use response::{ChatResponse, ErrorResponse, HealthResponse, UploadPdfResponse};

use crate::usecases::common::UseCaseMetadata;

/// Path of the multipart upload endpoint.
pub const UPLOAD_PDF_PATH: &str = "/upload_pdf";

/// Path of the question answering endpoint.
pub const GET_RESPONSE_PATH: &str = "/get_response";

/// Path of the liveness probe.
pub const HEALTHCHECK_PATH: &str = "/healthcheck";

/// Name of the single multipart field carrying the PDF bytes.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Media type a selected file must declare to be accepted.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

pub struct PdfChat;

impl UseCaseMetadata for PdfChat {
    fn usecase_index() -> &'static str {
        "u601"
    }

    fn usecase_name() -> &'static str {
        "pdf_chat"
    }

    fn display_name() -> &'static str {
        "PDF Chat Assistant"
    }

    fn description() -> &'static str {
        "Upload a PDF, page through it and ask questions about it"
    }
}
