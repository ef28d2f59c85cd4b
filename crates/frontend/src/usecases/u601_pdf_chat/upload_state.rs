//! Upload controller state
//!
//! The progress value is decorative: it is driven by a timer, not by bytes
//! sent, and only the final jump to 100 reflects the server's answer.
//! Every mutation takes the [`UploadTicket`] handed out by
//! [`UploadState::begin`], so callbacks of a superseded upload are ignored.

use super::config::PdfChatConfig;

/// Identifies one upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Succeeded { message: Option<String> },
    Failed { reason: String },
}

/// Result of one progress tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// Ceiling reached; the tick task should stop
    Ceiling,
    /// Ticket is outdated or the server already answered
    Stale,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadState {
    pub is_uploading: bool,
    /// 0..=100
    pub progress: f64,
    pub file_name: Option<String>,
    /// Last settled result, kept until the next upload begins
    pub outcome: Option<UploadOutcome>,
    generation: u64,
    resolved: bool,
}

impl UploadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, file_name: impl Into<String>, cfg: &PdfChatConfig) -> UploadTicket {
        self.generation += 1;
        self.is_uploading = true;
        self.progress = cfg.initial_progress;
        self.file_name = Some(file_name.into());
        self.outcome = None;
        self.resolved = false;
        UploadTicket(self.generation)
    }

    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        self.is_uploading && ticket.0 == self.generation
    }

    pub fn tick(&mut self, ticket: UploadTicket, increment: f64, cfg: &PdfChatConfig) -> TickOutcome {
        if !self.is_current(ticket) || self.resolved {
            return TickOutcome::Stale;
        }
        let next = (self.progress + increment.max(0.0)).min(cfg.progress_ceiling);
        self.progress = self.progress.max(next);
        if self.progress >= cfg.progress_ceiling {
            TickOutcome::Ceiling
        } else {
            TickOutcome::Advanced
        }
    }

    /// Returns `false` if the ticket is stale.
    pub fn succeed(&mut self, ticket: UploadTicket, message: Option<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.resolved = true;
        self.progress = 100.0;
        self.outcome = Some(UploadOutcome::Succeeded { message });
        true
    }

    /// Returns `false` if the ticket is stale. Progress is left where it was.
    pub fn fail(&mut self, ticket: UploadTicket, reason: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.resolved = true;
        self.outcome = Some(UploadOutcome::Failed {
            reason: reason.into(),
        });
        true
    }

    /// Hide the progress bar. Runs after the settle delay whatever the outcome.
    pub fn settle(&mut self, ticket: UploadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.is_uploading = false;
        self.progress = 0.0;
        true
    }

    pub fn percent(&self) -> u8 {
        self.progress.clamp(0.0, 100.0).round() as u8
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_uploading {
            "Uploading..."
        } else {
            "Upload PDF"
        }
    }

    /// Status line under the upload button, if any.
    pub fn status_line(&self) -> Option<String> {
        let name = self.file_name.as_deref().unwrap_or("PDF");
        match &self.outcome {
            Some(UploadOutcome::Succeeded { message: Some(m) }) => Some(m.clone()),
            Some(UploadOutcome::Succeeded { message: None }) => {
                Some(format!("{} uploaded", name))
            }
            Some(UploadOutcome::Failed { reason }) => {
                Some(format!("Upload failed: {}", reason))
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> PdfChatConfig {
        PdfChatConfig::default()
    }

    #[test]
    fn test_begin_starts_at_initial_progress() {
        let mut s = UploadState::new();
        let t = s.begin("doc.pdf", &cfg());
        assert!(s.is_uploading);
        assert!(s.is_current(t));
        assert_eq!(s.progress, 10.0);
        assert_eq!(s.button_label(), "Uploading...");
    }

    #[test]
    fn test_progress_is_monotonic_and_capped() {
        let cfg = cfg();
        let mut s = UploadState::new();
        let t = s.begin("doc.pdf", &cfg);
        let mut last = s.progress;
        let mut outcome = TickOutcome::Advanced;
        for i in 0..40 {
            let inc = cfg.increment_from_unit((i % 7) as f64 / 7.0);
            outcome = s.tick(t, inc, &cfg);
            assert!(s.progress >= last);
            assert!(s.progress <= cfg.progress_ceiling);
            last = s.progress;
            if outcome == TickOutcome::Ceiling {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Ceiling);
        assert_eq!(s.progress, 90.0);
        // further ticks never go past the ceiling
        assert_eq!(s.tick(t, 10.0, &cfg), TickOutcome::Ceiling);
        assert_eq!(s.progress, 90.0);
    }

    #[test]
    fn test_negative_increment_does_not_go_back() {
        let mut s = UploadState::new();
        let t = s.begin("doc.pdf", &cfg());
        s.tick(t, -50.0, &cfg());
        assert_eq!(s.progress, 10.0);
    }

    #[test]
    fn test_success_jumps_to_100_then_settles_to_zero() {
        let cfg = cfg();
        let mut s = UploadState::new();
        let t = s.begin("doc.pdf", &cfg);
        s.tick(t, 7.0, &cfg);
        assert!(s.succeed(t, None));
        assert_eq!(s.progress, 100.0);
        assert_eq!(s.percent(), 100);
        // ticks arriving after the answer are ignored
        assert_eq!(s.tick(t, 5.0, &cfg), TickOutcome::Stale);
        assert_eq!(s.progress, 100.0);

        assert!(s.settle(t));
        assert!(!s.is_uploading);
        assert_eq!(s.progress, 0.0);
        assert_eq!(s.button_label(), "Upload PDF");
        assert_eq!(s.status_line().as_deref(), Some("doc.pdf uploaded"));
    }

    #[test]
    fn test_failure_still_settles() {
        let cfg = cfg();
        let mut s = UploadState::new();
        let t = s.begin("doc.pdf", &cfg);
        s.tick(t, 5.0, &cfg);
        assert!(s.fail(t, "HTTP 500"));
        assert_eq!(s.progress, 15.0);
        assert_eq!(s.tick(t, 5.0, &cfg), TickOutcome::Stale);
        assert!(s.settle(t));
        assert!(!s.is_uploading);
        assert_eq!(s.progress, 0.0);
        assert_eq!(s.status_line().as_deref(), Some("Upload failed: HTTP 500"));
    }

    #[test]
    fn test_superseded_upload_cannot_touch_new_one() {
        let cfg = cfg();
        let mut s = UploadState::new();
        let old = s.begin("a.pdf", &cfg);
        let new = s.begin("b.pdf", &cfg);
        assert!(!s.is_current(old));
        assert_eq!(s.tick(old, 10.0, &cfg), TickOutcome::Stale);
        assert!(!s.succeed(old, Some("a done".into())));
        assert!(!s.settle(old));
        assert!(s.is_uploading);
        assert_eq!(s.progress, 10.0);
        assert!(s.outcome.is_none());
        assert!(s.is_current(new));
    }

    #[test]
    fn test_server_message_wins_in_status_line() {
        let mut s = UploadState::new();
        let t = s.begin("doc.pdf", &cfg());
        s.succeed(t, Some("PDF 'doc.pdf' uploaded to S3 and indexed successfully.".into()));
        assert_eq!(
            s.status_line().as_deref(),
            Some("PDF 'doc.pdf' uploaded to S3 and indexed successfully.")
        );
    }
}
