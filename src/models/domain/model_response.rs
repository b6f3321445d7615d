use serde_json::Value;

/// Envelope returned by the generative-text service, classified once into the
/// first matching known shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelResponse {
    /// Non-empty `candidates` list.
    Candidates(Vec<Candidate>),
    /// Non-empty `output` list.
    Output(Vec<OutputItem>),
    /// Flat `result` string.
    Result(String),
    /// Flat `text` string.
    Text(String),
    Unrecognized,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Candidate {
    pub content: Option<String>,
    pub output: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputItem {
    pub content: Option<String>,
    pub text: Option<String>,
}

impl ModelResponse {
    pub fn classify(value: &Value) -> Self {
        if let Some(candidates) = non_empty_array(value, "candidates") {
            return ModelResponse::Candidates(candidates.iter().map(Candidate::from_value).collect());
        }
        if let Some(items) = non_empty_array(value, "output") {
            return ModelResponse::Output(items.iter().map(OutputItem::from_value).collect());
        }
        if let Some(result) = value.get("result").and_then(Value::as_str) {
            return ModelResponse::Result(result.to_string());
        }
        if let Some(text) = value.get("text").and_then(Value::as_str) {
            return ModelResponse::Text(text.to_string());
        }
        ModelResponse::Unrecognized
    }
}

impl From<Value> for ModelResponse {
    fn from(value: Value) -> Self {
        ModelResponse::classify(&value)
    }
}

impl Candidate {
    fn from_value(value: &Value) -> Self {
        Self {
            content: text_field(value.get("content")),
            output: text_field(value.get("output")),
        }
    }
}

impl OutputItem {
    fn from_value(value: &Value) -> Self {
        Self {
            content: text_field(value.get("content")),
            text: text_field(value.get("text")),
        }
    }
}

fn non_empty_array<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    value
        .get(key)
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
}

/// Reads a text field that is either a plain string or a `{ parts: [{ text }] }`
/// object. Empty text counts as absent.
fn text_field(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.clone(),
        Value::Object(obj) => obj
            .get("parts")
            .and_then(Value::as_array)?
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(""),
        _ => return None,
    };
    Some(text).filter(|t| !t.is_empty())
}
