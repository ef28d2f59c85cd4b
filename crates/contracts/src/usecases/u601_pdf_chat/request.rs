use serde::{Deserialize, Serialize};

/// Body of `POST /get_response`.
///
/// The text is sent exactly as typed, without trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_message: String,
}

impl ChatRequest {
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_single_user_message_field() {
        let json = serde_json::to_value(ChatRequest::new("  What is the summary? ")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "user_message": "  What is the summary? " })
        );
    }
}
