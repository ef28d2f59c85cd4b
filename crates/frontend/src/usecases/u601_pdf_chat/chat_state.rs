//! Chat panel state
//!
//! Messages are append-only. A user turn is appended optimistically as
//! `Pending` and later becomes `Confirmed` (a bot turn follows it) or
//! `Failed` (nothing follows it, the turn can be retried).

use super::document::DocumentId;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    Pending,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Local render key, never sent to the server
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub status: DeliveryStatus,
    pub sent_at: DateTime<Utc>,
    /// Document that was selected when the question was asked
    pub document_id: Option<DocumentId>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, document_id: Option<DocumentId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::User,
            content: content.into(),
            status: DeliveryStatus::Pending,
            sent_at: Utc::now(),
            document_id,
        }
    }

    pub fn bot(content: impl Into<String>, document_id: Option<DocumentId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::Bot,
            content: content.into(),
            status: DeliveryStatus::Confirmed,
            sent_at: Utc::now(),
            document_id,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}

/// Why a submission was refused. Refusals change no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    EmptyInput,
    NoDocument,
    Busy,
    /// Retry target is missing or not a failed user turn
    NotRetryable,
}

impl fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SubmitRejection::EmptyInput => "input is empty",
            SubmitRejection::NoDocument => "no document selected",
            SubmitRejection::Busy => "a request is already in flight",
            SubmitRejection::NotRetryable => "message cannot be retried",
        };
        f.write_str(text)
    }
}

/// A request the caller must now send to `/get_response`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub message_id: Uuid,
    /// Literal text as typed
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    message_id: Uuid,
    clears_input: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub is_loading: bool,
    in_flight: Option<InFlight>,
    /// Bumped on every change to `messages`
    revision: u64,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Changes whenever the rendered list changes (messages, their status or
    /// the loading indicator), and only then. Typing does not touch it.
    pub fn list_key(&self) -> (u64, bool) {
        (self.revision, self.is_loading)
    }

    /// Input and submit control are enabled only with a document and no
    /// request in flight.
    pub fn input_enabled(&self, document: Option<DocumentId>) -> bool {
        document.is_some() && !self.is_loading
    }

    /// Append the current input as a pending user turn and enter the
    /// sending state.
    pub fn submit(&mut self, document: Option<DocumentId>) -> Result<Submission, SubmitRejection> {
        if self.is_loading {
            return Err(SubmitRejection::Busy);
        }
        if self.input.trim().is_empty() {
            return Err(SubmitRejection::EmptyInput);
        }
        if document.is_none() {
            return Err(SubmitRejection::NoDocument);
        }

        let message = ChatMessage::user(self.input.clone(), document);
        let submission = Submission {
            message_id: message.id,
            text: message.content.clone(),
        };
        self.messages.push(message);
        self.revision += 1;
        self.is_loading = true;
        self.in_flight = Some(InFlight {
            message_id: submission.message_id,
            clears_input: true,
        });
        Ok(submission)
    }

    /// Re-send a failed user turn in place. No new user turn is appended and
    /// the input buffer is left alone.
    pub fn retry(
        &mut self,
        message_id: Uuid,
        document: Option<DocumentId>,
    ) -> Result<Submission, SubmitRejection> {
        if self.is_loading {
            return Err(SubmitRejection::Busy);
        }
        if document.is_none() {
            return Err(SubmitRejection::NoDocument);
        }
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == message_id && m.is_user() && m.status == DeliveryStatus::Failed)
            .ok_or(SubmitRejection::NotRetryable)?;

        message.status = DeliveryStatus::Pending;
        message.document_id = document;
        self.revision += 1;
        let submission = Submission {
            message_id,
            text: message.content.clone(),
        };
        self.is_loading = true;
        self.in_flight = Some(InFlight {
            message_id,
            clears_input: false,
        });
        Ok(submission)
    }

    /// Apply the outcome of the round trip started for `message_id`.
    /// Returns `false` if that request is not the one in flight.
    pub fn complete(&mut self, message_id: Uuid, result: Result<String, String>) -> bool {
        let in_flight = match self.in_flight {
            Some(f) if f.message_id == message_id => f,
            _ => return false,
        };

        let Some(index) = self.messages.iter().position(|m| m.id == message_id) else {
            self.finish(in_flight);
            return false;
        };

        match result {
            Ok(reply) => {
                let document_id = self.messages[index].document_id;
                self.messages[index].status = DeliveryStatus::Confirmed;
                self.messages.push(ChatMessage::bot(reply, document_id));
            }
            Err(_) => {
                self.messages[index].status = DeliveryStatus::Failed;
            }
        }
        self.revision += 1;
        self.finish(in_flight);
        true
    }

    fn finish(&mut self, in_flight: InFlight) {
        if in_flight.clears_input {
            self.input.clear();
        }
        self.is_loading = false;
        self.in_flight = None;
    }

    pub fn placeholder(document: Option<DocumentId>) -> &'static str {
        if document.is_some() {
            "Ask anything about the PDF"
        } else {
            "Upload a PDF to start chatting"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Option<DocumentId> {
        Some(DocumentId::new_v4())
    }

    fn pairs(state: &ChatState) -> Vec<(ChatRole, &str)> {
        state
            .messages
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect()
    }

    #[test]
    fn test_successful_round_trip_appends_two_messages() {
        let doc = doc();
        let mut s = ChatState::new();
        s.input = "What is the summary?".into();

        let sub = s.submit(doc).unwrap();
        assert_eq!(sub.text, "What is the summary?");
        assert!(s.is_loading);
        assert!(!s.input_enabled(doc));
        // optimistic append before the server answers
        assert_eq!(pairs(&s), vec![(ChatRole::User, "What is the summary?")]);
        assert_eq!(s.messages[0].status, DeliveryStatus::Pending);

        assert!(s.complete(sub.message_id, Ok("It's about X.".into())));
        assert_eq!(
            pairs(&s),
            vec![
                (ChatRole::User, "What is the summary?"),
                (ChatRole::Bot, "It's about X."),
            ]
        );
        assert_eq!(s.messages[0].status, DeliveryStatus::Confirmed);
        assert_eq!(s.messages[1].document_id, doc);
        assert!(s.input.is_empty());
        assert!(!s.is_loading);
        assert!(s.input_enabled(doc));
    }

    #[test]
    fn test_failed_round_trip_appends_only_user_message() {
        let mut s = ChatState::new();
        s.input = "hello".into();
        let sub = s.submit(doc()).unwrap();
        assert!(s.complete(sub.message_id, Err("HTTP 500".into())));
        assert_eq!(pairs(&s), vec![(ChatRole::User, "hello")]);
        assert_eq!(s.messages[0].status, DeliveryStatus::Failed);
        assert!(s.input.is_empty());
        assert!(!s.is_loading);
    }

    #[test]
    fn test_literal_text_is_sent_untrimmed() {
        let mut s = ChatState::new();
        s.input = "  spaced question \n".into();
        let sub = s.submit(doc()).unwrap();
        assert_eq!(sub.text, "  spaced question \n");
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut s = ChatState::new();
        let before = s.clone();
        assert_eq!(s.submit(doc()), Err(SubmitRejection::EmptyInput));
        assert_eq!(s, before);

        s.input = " \t\n ".into();
        let before = s.clone();
        assert_eq!(s.submit(doc()), Err(SubmitRejection::EmptyInput));
        assert_eq!(s, before);

        s.input = "question".into();
        let before = s.clone();
        assert_eq!(s.submit(None), Err(SubmitRejection::NoDocument));
        assert_eq!(s, before);
        assert!(!s.input_enabled(None));
    }

    #[test]
    fn test_second_submission_while_loading_is_rejected() {
        let doc = doc();
        let mut s = ChatState::new();
        s.input = "first".into();
        s.submit(doc).unwrap();
        s.input = "second".into();
        assert_eq!(s.submit(doc), Err(SubmitRejection::Busy));
        assert_eq!(s.messages.len(), 1);
    }

    #[test]
    fn test_unknown_completion_is_ignored() {
        let mut s = ChatState::new();
        s.input = "q".into();
        s.submit(doc()).unwrap();
        assert!(!s.complete(Uuid::new_v4(), Ok("late".into())));
        assert_eq!(s.messages.len(), 1);
        assert!(s.is_loading);
    }

    #[test]
    fn test_retry_resends_failed_turn_in_place() {
        let doc = doc();
        let mut s = ChatState::new();
        s.input = "q".into();
        let sub = s.submit(doc).unwrap();
        s.complete(sub.message_id, Err("offline".into()));

        s.input = "draft".into();
        let again = s.retry(sub.message_id, doc).unwrap();
        assert_eq!(again.message_id, sub.message_id);
        assert_eq!(again.text, "q");
        assert_eq!(s.messages.len(), 1);
        assert_eq!(s.messages[0].status, DeliveryStatus::Pending);

        s.complete(again.message_id, Ok("answer".into()));
        assert_eq!(pairs(&s), vec![(ChatRole::User, "q"), (ChatRole::Bot, "answer")]);
        assert_eq!(s.input, "draft");
    }

    #[test]
    fn test_only_failed_user_turns_are_retryable() {
        let doc = doc();
        let mut s = ChatState::new();
        s.input = "q".into();
        let sub = s.submit(doc).unwrap();
        s.complete(sub.message_id, Ok("a".into()));
        assert_eq!(s.retry(sub.message_id, doc), Err(SubmitRejection::NotRetryable));
        let bot_id = s.messages[1].id;
        assert_eq!(s.retry(bot_id, doc), Err(SubmitRejection::NotRetryable));
    }

    #[test]
    fn test_typing_does_not_change_list_key() {
        let doc = doc();
        let mut s = ChatState::new();
        let idle = s.list_key();
        s.set_input("W");
        s.set_input("What is");
        assert_eq!(s.list_key(), idle);

        s.set_input("What is the summary?");
        let sub = s.submit(doc).unwrap();
        let sending = s.list_key();
        assert_ne!(sending, idle);

        s.complete(sub.message_id, Err("offline".into()));
        let failed = s.list_key();
        assert_ne!(failed, sending);
        s.set_input("next question");
        assert_eq!(s.list_key(), failed);

        s.retry(sub.message_id, doc).unwrap();
        assert_ne!(s.list_key(), failed);
    }

    #[test]
    fn test_placeholder_depends_on_document() {
        assert_eq!(ChatState::placeholder(None), "Upload a PDF to start chatting");
        assert_eq!(ChatState::placeholder(doc()), "Ask anything about the PDF");
    }
}
