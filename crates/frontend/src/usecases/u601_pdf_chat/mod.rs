//! u601 PDF Chat (MVVM Standard)
//!
//! Structure:
//! - config.rs: timing and layout tunables
//! - document.rs, upload_state.rs, page_cursor.rs, chat_state.rs: plain state records
//! - api.rs: HTTP client of the PDF chat service
//! - pdf_bridge.rs: pdf.js bindings
//! - view_model.rs: PdfChatVm with RwSignals and timer slots
//! - view.rs, viewer.rs, chat_panel.rs: components

pub mod api;
pub mod chat_panel;
pub mod chat_state;
pub mod config;
pub mod document;
pub mod page_cursor;
pub mod pdf_bridge;
pub mod upload_state;
pub mod view;
pub mod view_model;
pub mod viewer;

pub use config::PdfChatConfig;
pub use view::PdfChatPage;
pub use view_model::PdfChatVm;
