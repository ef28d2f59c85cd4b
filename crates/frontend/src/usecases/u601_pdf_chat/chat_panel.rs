//! Chat panel: message list and input form

use super::chat_state::{ChatMessage, ChatState, DeliveryStatus};
use super::view_model::PdfChatVm;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ChatMessages(vm: PdfChatVm) -> impl IntoView {
    let chat_end_ref = NodeRef::<leptos::html::Div>::new();
    // Только изменения списка, ввод текста сюда не доходит
    let list_key = Memo::new(move |_| vm.chat.with(|c| c.list_key()));

    // Прокрутка к последнему сообщению при каждом изменении списка
    Effect::new(move |_| {
        list_key.track();
        if let Some(end) = chat_end_ref.get() {
            request_animation_frame(move || {
                let opts = web_sys::ScrollIntoViewOptions::new();
                opts.set_behavior(web_sys::ScrollBehavior::Smooth);
                end.scroll_into_view_with_scroll_into_view_options(&opts);
            });
        }
    });

    view! {
        <div style="display: flex; flex-direction: column; gap: 12px;">
            <For
                each=move || {
                    list_key.track();
                    vm.chat.with_untracked(|c| c.messages.clone())
                }
                key=|msg| (msg.id, msg.status)
                let:msg
            >
                <MessageBubble vm=vm msg=msg />
            </For>

            {move || {
                list_key
                    .get()
                    .1
                    .then(|| {
                        view! {
                            <div style="display: flex; justify-content: center;">
                                <Spinner size=SpinnerSize::Small />
                            </div>
                        }
                    })
            }}
            <div node_ref=chat_end_ref></div>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn MessageBubble(vm: PdfChatVm, msg: ChatMessage) -> impl IntoView {
    let is_user = msg.is_user();
    let failed = msg.status == DeliveryStatus::Failed;
    let pending = msg.status == DeliveryStatus::Pending;
    let message_id = msg.id;
    let time = msg.sent_at.with_timezone(&chrono::Local).format("%H:%M").to_string();

    let outer_style = if is_user {
        "align-self: flex-end; max-width: 70%;"
    } else {
        "align-self: flex-start; max-width: 80%;"
    };
    let bubble_style = match (is_user, failed) {
        (true, false) => "background: var(--colorBrandBackground2); padding: 10px 14px; border-radius: 12px;",
        (true, true) => "background: var(--colorBrandBackground2); padding: 10px 14px; border-radius: 12px; border: 1px solid var(--colorPaletteRedBorder2);",
        (false, _) => "background: var(--colorNeutralBackground2); padding: 10px 14px; border-radius: 12px;",
    };

    view! {
        <div class=format!("chat-message chat-message--{}", msg.role.as_str()) style=outer_style>
            <div style=bubble_style>
                <div style="white-space: pre-wrap;">{msg.content.clone()}</div>
                <div style="font-size: 11px; opacity: 0.7; margin-top: 6px;">
                    {time}
                    {pending.then_some(" • sending…")}
                </div>
            </div>
            {failed.then(|| {
                view! {
                    <Flex align=FlexAlign::Center justify=FlexJustify::End style="gap: 8px; margin-top: 4px;">
                        <span style="font-size: 12px; color: var(--colorPaletteRedForeground1);">
                            "Not delivered"
                        </span>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            disabled=Signal::derive(move || {
                                !vm.chat.with(|c| c.input_enabled(vm.document.with(|d| d.as_ref().map(|d| d.id))))
                            })
                            on_click=move |_| vm.retry(message_id)
                        >
                            {icon("refresh")}
                            " Retry"
                        </Button>
                    </Flex>
                }
            })}
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ChatInput(vm: PdfChatVm) -> impl IntoView {
    let document_id = move || vm.document.with(|d| d.as_ref().map(|d| d.id));
    let enabled = move || vm.chat.with(|c| c.input_enabled(document_id()));

    view! {
        <div
            style=move || {
                format!(
                    "display: flex; flex-direction: column; gap: 8px;{}",
                    if vm.chat.with(|c| c.is_loading) { " opacity: 0.5;" } else { "" },
                )
            }
        >
            <textarea
                rows=2
                style="width: 100%; min-height: 60px; max-height: 200px; resize: none; border: none; outline: none; background: transparent; font-size: 16px;"
                placeholder=move || ChatState::placeholder(document_id())
                disabled=move || !enabled()
                prop:value=move || vm.chat.with(|c| c.input.clone())
                on:input=move |ev| vm.set_input(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" && !ev.shift_key() {
                        ev.prevent_default();
                        vm.submit();
                    }
                }
            ></textarea>
            <Flex justify=FlexJustify::End>
                <Button
                    appearance=ButtonAppearance::Primary
                    shape=ButtonShape::Circular
                    disabled=Signal::derive(move || !enabled())
                    on_click=move |_| vm.submit()
                >
                    {icon("arrow-up")}
                </Button>
            </Flex>
        </div>
    }
}
