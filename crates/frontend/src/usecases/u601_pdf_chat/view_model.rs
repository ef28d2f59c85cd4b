//! PDF Chat - View Model
//!
//! Owns one signal per concern (document, upload, page cursor, chat) plus
//! the timer slots of the upload animation. All event handlers of the page
//! go through here.

use super::api;
use super::chat_state::{ChatState, Submission};
use super::config::PdfChatConfig;
use super::document::{DocumentId, SelectedDocument};
use super::page_cursor::PageCursor;
use super::pdf_bridge;
use super::upload_state::{TickOutcome, UploadState, UploadTicket};
use crate::shared::scheduled_task::{ScheduledTask, TaskSlot};
use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

#[derive(Clone, Copy)]
pub struct PdfChatVm {
    pub config: PdfChatConfig,
    pub document: RwSignal<Option<SelectedDocument>>,
    pub upload: RwSignal<UploadState>,
    pub cursor: RwSignal<PageCursor>,
    pub chat: RwSignal<ChatState>,
    /// None until the first healthcheck answers
    pub backend_online: RwSignal<Option<bool>>,
    tick_task: TaskSlot,
    settle_task: TaskSlot,
}

impl PdfChatVm {
    pub fn new(config: PdfChatConfig) -> Self {
        let vm = Self {
            config,
            document: RwSignal::new(None),
            upload: RwSignal::new(UploadState::new()),
            cursor: RwSignal::new(PageCursor::new()),
            chat: RwSignal::new(ChatState::new()),
            backend_online: RwSignal::new(None),
            tick_task: TaskSlot::new(),
            settle_task: TaskSlot::new(),
        };

        let document = vm.document;
        on_cleanup(move || {
            if let Some(Some(doc)) = document.try_get_untracked() {
                release(&doc);
            }
        });

        vm
    }

    pub fn document_id(&self) -> Option<DocumentId> {
        self.document
            .with_untracked(|doc| doc.as_ref().map(|d| d.id))
    }

    // ---- Upload controller ----

    /// Handle the first file of a picker selection. Anything that is not a
    /// PDF is ignored.
    pub fn select_file(&self, file: web_sys::File) {
        let document = match SelectedDocument::from_file(&file) {
            Ok(Some(document)) => document,
            Ok(None) => {
                log::debug!(
                    "Ignoring non-PDF selection: {} ({})",
                    file.name(),
                    file.type_()
                );
                return;
            }
            Err(e) => {
                log::error!("Failed to open {}: {}", file.name(), e);
                return;
            }
        };

        log::info!(
            "File selected: {} ({}), document {}",
            document.name,
            document.size_label(),
            document.id
        );

        if let Some(previous) = self.document.get_untracked() {
            release(&previous);
        }
        self.cursor.set(PageCursor::new());
        self.document.set(Some(document));

        self.start_upload(file);
    }

    fn start_upload(&self, file: web_sys::File) {
        let cfg = self.config;
        let name = file.name();
        let Some(ticket) = self.upload.try_update(|s| s.begin(name.clone(), &cfg)) else {
            return;
        };
        log::info!("Upload started: {}", name);

        self.settle_task.cancel();

        let upload = self.upload;
        let tick_task = self.tick_task;
        self.tick_task.replace(ScheduledTask::every(cfg.tick_interval_ms, move || {
            let increment = cfg.increment_from_unit(js_sys::Math::random());
            let outcome = upload
                .try_update(|s| s.tick(ticket, increment, &cfg))
                .unwrap_or(TickOutcome::Stale);
            if outcome != TickOutcome::Advanced {
                tick_task.cancel_deferred();
            }
        }));

        let settle_task = self.settle_task;
        let started_at = Utc::now();
        spawn_local(async move {
            let result = api::upload_pdf(&file).await;

            if !is_current(upload, ticket) {
                log::debug!("Upload of {} finished after being superseded", name);
                return;
            }
            tick_task.cancel();

            match result {
                Ok(response) => {
                    let elapsed = (Utc::now() - started_at).num_milliseconds() as f64 / 1000.0;
                    log::info!("File uploaded successfully: {} in {:.2}s", name, elapsed);
                    if let Some(url) = &response.s3_url {
                        log::debug!("Stored at {}", url);
                    }
                    upload.try_update(|s| s.succeed(ticket, response.message));
                }
                Err(e) => {
                    log::error!("Error uploading {}: {}", name, e);
                    upload.try_update(|s| s.fail(ticket, e.to_string()));
                }
            }

            settle_task.replace(ScheduledTask::after(cfg.settle_delay_ms, move || {
                upload.try_update(|s| s.settle(ticket));
            }));
        });
    }

    // ---- Document viewer ----

    pub fn set_page_count(&self, document_id: DocumentId, num_pages: u32) {
        if self.document_id() != Some(document_id) {
            return;
        }
        self.cursor.update(|c| c.set_total(num_pages));
    }

    pub fn prev_page(&self) {
        self.cursor.update(|c| c.prev());
    }

    pub fn next_page(&self) {
        self.cursor.update(|c| c.next());
    }

    // ---- Chat panel ----

    pub fn set_input(&self, text: String) {
        self.chat.update(|c| c.set_input(text));
    }

    pub fn submit(&self) {
        let document_id = self.document_id();
        match self.chat.try_update(|c| c.submit(document_id)) {
            Some(Ok(submission)) => self.send(submission),
            Some(Err(reason)) => log::debug!("Chat submission ignored: {}", reason),
            None => {}
        }
    }

    pub fn retry(&self, message_id: Uuid) {
        let document_id = self.document_id();
        match self.chat.try_update(|c| c.retry(message_id, document_id)) {
            Some(Ok(submission)) => self.send(submission),
            Some(Err(reason)) => log::debug!("Retry ignored: {}", reason),
            None => {}
        }
    }

    fn send(&self, submission: Submission) {
        let chat = self.chat;
        spawn_local(async move {
            let result = api::get_response(&submission.text).await.map_err(|e| {
                log::error!("Error fetching response: {}", e);
                e.to_string()
            });
            chat.try_update(|c| c.complete(submission.message_id, result));
        });
    }

    // ---- Backend status ----

    pub fn check_backend(&self) {
        let backend_online = self.backend_online;
        spawn_local(async move {
            let online = match api::healthcheck().await {
                Ok(health) => {
                    log::info!("PDF chat service status: {}", health.status);
                    health.is_ok()
                }
                Err(e) => {
                    log::warn!("PDF chat service unreachable: {}", e);
                    false
                }
            };
            backend_online.try_set(Some(online));
        });
    }
}

fn is_current(upload: RwSignal<UploadState>, ticket: UploadTicket) -> bool {
    upload
        .try_with_untracked(|s| s.is_current(ticket))
        .unwrap_or(false)
}

fn release(document: &SelectedDocument) {
    pdf_bridge::release_document(&document.url);
    document.release();
}
