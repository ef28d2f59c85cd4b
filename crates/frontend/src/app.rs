use crate::usecases::u601_pdf_chat::PdfChatPage;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <PdfChatPage />
        </ConfigProvider>
    }
}
