//! PDF Chat - main page component

use super::chat_panel::{ChatInput, ChatMessages};
use super::config::PdfChatConfig;
use super::upload_state::UploadOutcome;
use super::view_model::PdfChatVm;
use super::viewer::DocumentViewer;
use crate::shared::icons::icon;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u601_pdf_chat::PdfChat;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

#[component]
#[allow(non_snake_case)]
pub fn PdfChatPage(#[prop(optional)] config: Option<PdfChatConfig>) -> impl IntoView {
    let vm = PdfChatVm::new(config.unwrap_or_default());
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    vm.check_backend();

    let handle_file_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            vm.select_file(file);
        }
        // Сброс, чтобы повторный выбор того же файла снова вызвал change
        input.set_value("");
    };

    let progress_style = move || {
        format!(
            "width: {}%; height: 100%; background: var(--colorBrandBackground); transition: width 0.3s;",
            vm.upload.with(|u| u.percent())
        )
    };

    view! {
        <div style="display: flex; flex-direction: column; height: 100vh;">
            <header
                title=PdfChat::description()
                style="position: sticky; top: 0; z-index: 10; padding: 16px 24px; display: flex; justify-content: center; align-items: center; gap: 8px; font-size: 28px; font-weight: bold;"
            >
                {icon("file-text")}
                {PdfChat::display_name()}
                <span
                    title=move || match vm.backend_online.get() {
                        Some(true) => "Service reachable",
                        Some(false) => "Service unreachable",
                        None => "Checking service…",
                    }
                    style=move || {
                        let color = match vm.backend_online.get() {
                            Some(true) => "var(--colorPaletteGreenBackground3)",
                            Some(false) => "var(--colorPaletteRedBackground3)",
                            None => "var(--colorNeutralBackground5)",
                        };
                        format!(
                            "display: inline-block; width: 10px; height: 10px; border-radius: 50%; background: {};",
                            color,
                        )
                    }
                ></span>
            </header>

            <div style="text-align: center; font-size: 14px; color: var(--colorNeutralForeground3); margin-top: -8px;">
                {PdfChat::description()}
            </div>

            <div style="flex: 1; overflow-y: auto;">
                <div style="max-width: 672px; margin: 0 auto; padding: 16px; display: flex; flex-direction: column; gap: 16px;">
                    // Загрузка PDF
                    <Flex justify=FlexJustify::Center>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| {
                                if let Some(input) = file_input_ref.get() {
                                    input.click();
                                }
                            }
                        >
                            {icon("upload")}
                            {move || format!(" {}", vm.upload.with(|u| u.button_label()))}
                        </Button>
                        <input
                            type="file"
                            accept=".pdf,application/pdf"
                            style="display: none;"
                            node_ref=file_input_ref
                            on:change=handle_file_change
                        />
                    </Flex>

                    <Show when=move || vm.upload.with(|u| u.is_uploading)>
                        <div style="background: var(--colorNeutralBackground3); height: 8px; border-radius: 4px; overflow: hidden;">
                            <div style=progress_style></div>
                        </div>
                    </Show>

                    {move || {
                        vm.upload
                            .with(|u| {
                                let failed = matches!(u.outcome, Some(UploadOutcome::Failed { .. }));
                                u.status_line().map(|line| (line, failed))
                            })
                            .map(|(line, failed)| {
                                let color = if failed {
                                    "var(--colorPaletteRedForeground1)"
                                } else {
                                    "var(--colorNeutralForeground3)"
                                };
                                view! {
                                    <div style=format!("text-align: center; font-size: 13px; color: {};", color)>
                                        {line}
                                    </div>
                                }
                            })
                    }}

                    <Show when=move || vm.document.with(|d| d.is_some())>
                        <DocumentViewer vm=vm />
                    </Show>

                    <ChatMessages vm=vm />
                </div>
            </div>

            <div style="position: sticky; bottom: 0; padding: 0 16px 16px;">
                <div style="max-width: 672px; margin: 0 auto; padding: 16px; border-radius: 12px; background: var(--colorNeutralBackground2);">
                    <ChatInput vm=vm />
                </div>
            </div>
        </div>
    }
}
