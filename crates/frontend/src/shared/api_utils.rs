//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Port the PDF chat service listens on when the base URL is derived from
/// the page location.
pub const DEFAULT_API_PORT: u16 = 8000;

/// Get the base URL for API requests
///
/// A base baked in at compile time through `PDF_CHAT_API_BASE` wins.
/// Otherwise the URL is built from the current window location, using
/// [`DEFAULT_API_PORT`] for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:8000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    if let Some(base) = option_env!("PDF_CHAT_API_BASE") {
        return normalize_base(base);
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_from_location(&protocol, &hostname, DEFAULT_API_PORT)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/upload_pdf");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn base_from_location(protocol: &str, hostname: &str, port: u16) -> String {
    format!("{}//{}:{}", protocol, hostname, port)
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_from_location() {
        assert_eq!(
            base_from_location("https:", "example.com", 8000),
            "https://example.com:8000"
        );
    }

    #[test]
    fn test_normalize_base_strips_trailing_slash() {
        assert_eq!(normalize_base(" http://127.0.0.1:8000/ "), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h:8000", "/upload_pdf"), "http://h:8000/upload_pdf");
        assert_eq!(join_url("http://h:8000", "get_response"), "http://h:8000/get_response");
        assert_eq!(join_url("", "/healthcheck"), "/healthcheck");
    }
}
