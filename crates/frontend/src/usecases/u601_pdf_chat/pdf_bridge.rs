//! JavaScript bindings for pdf.js
//!
//! Parsing and rasterising pages is left entirely to pdf.js; see
//! `pdfjs_bridge.js` at the crate root.

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen(module = "/pdfjs_bridge.js")]
extern "C" {
    /// Returns `{ num_pages: number }`
    #[wasm_bindgen(catch, js_name = loadPdfDocument)]
    async fn load_pdf_document_js(url: &str) -> Result<JsValue, JsValue>;

    /// Returns `true` if drawn, `false` if superseded by a newer render
    #[wasm_bindgen(catch, js_name = renderPdfPage)]
    async fn render_pdf_page_js(
        url: &str,
        page_number: u32,
        width: u32,
        canvas: &web_sys::HtmlCanvasElement,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = releasePdfDocument)]
    fn release_pdf_document_js(url: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PdfDocumentInfo {
    pub num_pages: u32,
}

pub async fn load_document(url: &str) -> Result<PdfDocumentInfo, String> {
    let value = load_pdf_document_js(url).await.map_err(|e| js_error_message(&e))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| e.to_string())
}

/// Draw `page_number` (1-based) scaled to `width` CSS px.
/// `Ok(false)` means a newer render on the same canvas took over.
pub async fn render_page(
    url: &str,
    page_number: u32,
    width: u32,
    canvas: &web_sys::HtmlCanvasElement,
) -> Result<bool, String> {
    let value = render_pdf_page_js(url, page_number, width, canvas)
        .await
        .map_err(|e| js_error_message(&e))?;
    Ok(value.as_bool().unwrap_or(true))
}

pub fn release_document(url: &str) {
    release_pdf_document_js(url);
}

fn js_error_message(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{:?}", err))
}
