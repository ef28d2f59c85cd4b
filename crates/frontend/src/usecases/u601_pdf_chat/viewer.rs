//! Document viewer: one page at a time on a canvas, with prev/next navigation

use super::pdf_bridge;
use super::view_model::PdfChatVm;
use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn DocumentViewer(vm: PdfChatVm) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let page_width = vm.config.page_width;

    // Parse the document whenever a new one is selected
    Effect::new(move |_| {
        let Some((document_id, url)) = vm
            .document
            .with(|doc| doc.as_ref().map(|d| (d.id, d.url.clone())))
        else {
            return;
        };
        spawn_local(async move {
            match pdf_bridge::load_document(&url).await {
                Ok(info) => {
                    log::debug!("Document {} has {} pages", document_id, info.num_pages);
                    vm.set_page_count(document_id, info.num_pages);
                }
                Err(e) => log::error!("Failed to load PDF {}: {}", document_id, e),
            }
        });
    });

    // Render the current page once the page count is known
    Effect::new(move |_| {
        let url = vm.document.with(|doc| doc.as_ref().map(|d| d.url.clone()));
        let cursor = vm.cursor.get();
        let (Some(url), Some(canvas)) = (url, canvas_ref.get()) else {
            return;
        };
        if cursor.total().is_none() {
            return;
        }
        let page = cursor.current();
        spawn_local(async move {
            match pdf_bridge::render_page(&url, page, page_width, &canvas).await {
                Ok(true) => {}
                Ok(false) => log::debug!("Render of page {} superseded", page),
                Err(e) => log::error!("Failed to render page {}: {}", page, e),
            }
        });
    });

    view! {
        <div style="background: var(--colorNeutralBackground1); padding: 16px; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.12); margin-bottom: 16px;">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 8px;">
                <h2 style="font-size: 18px; font-weight: 600;">"Current PDF"</h2>
                <span style="color: var(--colorNeutralForeground3); font-size: 13px;">
                    {move || {
                        vm.document
                            .with(|doc| doc.as_ref().map(|d| format!("{} · {}", d.name, d.size_label())))
                            .unwrap_or_default()
                    }}
                </span>
            </Flex>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 8px;">
                <Button
                    size=ButtonSize::Small
                    disabled=Signal::derive(move || !vm.cursor.with(|c| c.can_go_prev()))
                    on_click=move |_| vm.prev_page()
                >
                    {icon("chevron-left")}
                    " Previous"
                </Button>
                <span style="font-size: 14px; color: var(--colorNeutralForeground2);">
                    {move || vm.cursor.with(|c| c.label())}
                </span>
                <Button
                    size=ButtonSize::Small
                    disabled=Signal::derive(move || !vm.cursor.with(|c| c.can_go_next()))
                    on_click=move |_| vm.next_page()
                >
                    "Next "
                    {icon("chevron-right")}
                </Button>
            </Flex>
            <div style="border: 1px solid var(--colorNeutralStroke2); border-radius: 4px; overflow: auto; display: flex; justify-content: center;">
                <canvas node_ref=canvas_ref></canvas>
            </div>
        </div>
    }
}
