// Chat request/response models
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize, Serializer};

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatQuery {
    pub question: String,

    #[serde(default)]
    pub stream: bool,

    #[serde(default = "default_max_length")]
    pub max_length: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl ChatQuery {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            stream: false,
            max_length: default_max_length(),
            temperature: default_temperature(),
        }
    }
}

fn default_max_length() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

/// Outcome of a chat call. Exactly one side is ever populated.
///
/// Serializes as `{"answer": ..., "error": ...}` with the other side `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAnswer {
    Answer(String),
    Error(String),
}

impl ChatAnswer {
    pub fn answer(&self) -> Option<&str> {
        match self {
            ChatAnswer::Answer(text) => Some(text),
            ChatAnswer::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ChatAnswer::Answer(_) => None,
            ChatAnswer::Error(message) => Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ChatAnswer::Error(_))
    }
}

impl Serialize for ChatAnswer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            answer: Option<&'a str>,
            error: Option<&'a str>,
        }

        Body {
            answer: self.answer(),
            error: self.error(),
        }
        .serialize(serializer)
    }
}

// ============================================================================
// Provider wire format
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProviderRequest {
    pub messages: Vec<ProviderMessage>,
    pub stream: bool,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub max_length: u32,
    pub temperature: f32,
}

impl From<&ChatQuery> for ProviderRequest {
    fn from(query: &ChatQuery) -> Self {
        Self {
            messages: vec![ProviderMessage {
                role: "user",
                content: query.question.clone(),
            }],
            stream: query.stream,
            parameters: GenerationParameters {
                max_length: query.max_length,
                temperature: query.temperature,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_defaults() {
        let query: ChatQuery = serde_json::from_value(json!({"question": "hi"})).unwrap();
        assert_eq!(query, ChatQuery::new("hi"));
        assert!(!query.stream);
        assert_eq!(query.max_length, 500);
        assert!((query.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_answer_serialization() {
        let ok = serde_json::to_value(ChatAnswer::Answer("hello".into())).unwrap();
        assert_eq!(ok, json!({"answer": "hello", "error": null}));

        let err = serde_json::to_value(ChatAnswer::Error("boom".into())).unwrap();
        assert_eq!(err, json!({"answer": null, "error": "boom"}));
    }

    #[test]
    fn test_provider_payload_shape() {
        let mut query = ChatQuery::new("What is 2+2?");
        query.stream = true;
        query.max_length = 64;
        query.temperature = 0.25;

        let payload = serde_json::to_value(ProviderRequest::from(&query)).unwrap();
        assert_eq!(
            payload,
            json!({
                "messages": [{"role": "user", "content": "What is 2+2?"}],
                "stream": true,
                "parameters": {"max_length": 64, "temperature": 0.25}
            })
        );
    }
}
