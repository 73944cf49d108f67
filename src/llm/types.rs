use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// A single, non-streaming chat completion request.
///
/// Consumed once by the provider; never persisted.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f64>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
        }
    }

    /// Request carrying a single user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(vec![ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }])
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_request_wraps_single_message() {
        let request = ChatRequest::user("hello").with_temperature(Some(0.4));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.messages[0].content, "hello");
        assert_eq!(request.temperature, Some(0.4));
    }
}
