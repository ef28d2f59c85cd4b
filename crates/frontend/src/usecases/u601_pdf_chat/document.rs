//! Selected document and its displayable handle

use contracts::usecases::u601_pdf_chat::PDF_MEDIA_TYPE;
use std::fmt;
use uuid::Uuid;

/// Client-side identity of a selected document.
///
/// Never sent over the wire; the chat service tracks the current document
/// on its own. Messages remember which id they were asked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A user-chosen PDF together with the blob URL the viewer renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedDocument {
    pub id: DocumentId,
    pub name: String,
    pub size_bytes: u64,
    /// `blob:` URL owned by this document; revoked by [`SelectedDocument::release`]
    pub url: String,
}

impl SelectedDocument {
    pub fn new(name: impl Into<String>, size_bytes: u64, url: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new_v4(),
            name: name.into(),
            size_bytes,
            url: url.into(),
        }
    }

    /// Wrap `file` in a blob URL. Returns `Ok(None)` for anything that does
    /// not declare itself as a PDF.
    pub fn from_file(file: &web_sys::File) -> Result<Option<Self>, String> {
        if !is_pdf(&file.type_()) {
            return Ok(None);
        }
        let url = web_sys::Url::create_object_url_with_blob(file)
            .map_err(|e| format!("Failed to create object URL: {:?}", e))?;
        Ok(Some(Self::new(file.name(), file.size() as u64, url)))
    }

    pub fn release(&self) {
        if let Err(e) = web_sys::Url::revoke_object_url(&self.url) {
            log::warn!("Failed to revoke object URL for {}: {:?}", self.name, e);
        }
    }

    pub fn size_label(&self) -> String {
        format_size(self.size_bytes)
    }
}

/// Whether a declared media type is PDF. Parameters such as `; charset`
/// are ignored.
pub fn is_pdf(media_type: &str) -> bool {
    media_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_MEDIA_TYPE))
        .unwrap_or(false)
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf("application/pdf"));
        assert!(is_pdf("Application/PDF"));
        assert!(is_pdf("application/pdf; qs=0.001"));
        assert!(!is_pdf(""));
        assert!(!is_pdf("text/plain"));
        assert!(!is_pdf("application/pdfx"));
    }

    #[test]
    fn test_new_documents_get_distinct_ids() {
        let a = SelectedDocument::new("doc.pdf", 10, "blob:a");
        let b = SelectedDocument::new("doc.pdf", 10, "blob:b");
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "doc.pdf");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }
}
