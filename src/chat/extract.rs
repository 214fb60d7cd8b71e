//! Answer extraction from loosely-typed provider payloads.
//!
//! Providers disagree on where the generated text lives. Each known layout is
//! a [`ResponseShape`]; they are tried in [`ResponseShape::ORDER`] and the
//! first one that yields text wins. [`ResponseShape::Fallback`] always
//! matches, so extraction never fails.
//!
//! Falsy JSON values (`null`, `false`, `0`, `""`, `[]`, `{}`) never count as
//! an answer; the search moves on to the next shape instead.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde_json::Value;

/// Top-level keys checked by [`ResponseShape::DirectKey`], in order.
pub const DIRECT_KEYS: [&str; 5] = ["output", "response", "text", "content", "message"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{"output": "..."}` and friends, see [`DIRECT_KEYS`].
    DirectKey,
    /// OpenAI-style `{"choices": [{"message": {"content": "..."}}]}`.
    ChoicesArray,
    /// `{"data": {"content" | "text": "..."}}` or `{"data": "..."}`.
    DataField,
    /// The payload itself is a string.
    RawString,
    /// The whole payload, serialized.
    Fallback,
}

impl ResponseShape {
    pub const ORDER: [ResponseShape; 5] = [
        ResponseShape::DirectKey,
        ResponseShape::ChoicesArray,
        ResponseShape::DataField,
        ResponseShape::RawString,
        ResponseShape::Fallback,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResponseShape::DirectKey => "direct_key",
            ResponseShape::ChoicesArray => "choices_array",
            ResponseShape::DataField => "data_field",
            ResponseShape::RawString => "raw_string",
            ResponseShape::Fallback => "fallback",
        }
    }

    pub fn try_extract(self, value: &Value) -> Option<String> {
        match self {
            ResponseShape::DirectKey => {
                let object = value.as_object()?;
                DIRECT_KEYS
                    .iter()
                    .find_map(|key| object.get(*key).and_then(answer_text))
            }
            ResponseShape::ChoicesArray => {
                let first = value.as_object()?.get("choices")?.as_array()?.first()?;
                first
                    .as_object()?
                    .get("message")?
                    .get("content")
                    .and_then(answer_text)
            }
            ResponseShape::DataField => match value.as_object()?.get("data")? {
                Value::Object(data) => data
                    .get("content")
                    .and_then(answer_text)
                    .or_else(|| data.get("text").and_then(answer_text)),
                Value::String(text) if !text.is_empty() => Some(text.clone()),
                _ => None,
            },
            ResponseShape::RawString => value
                .as_str()
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            ResponseShape::Fallback => Some(match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            }),
        }
    }
}

/// Run the shape chain over `value`, returning the answer and the shape that
/// produced it.
pub fn extract_answer(value: &Value) -> (String, ResponseShape) {
    ResponseShape::ORDER
        .iter()
        .find_map(|shape| shape.try_extract(value).map(|answer| (answer, *shape)))
        .unwrap_or_else(|| (value.to_string(), ResponseShape::Fallback))
}

/// Parse a provider body, treating anything that is not JSON as a raw string.
pub fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Displayable text for a candidate answer, or `None` if it is falsy.
fn answer_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) => (!text.is_empty()).then(|| text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        other => Some(other.to_string()),
    }
}
