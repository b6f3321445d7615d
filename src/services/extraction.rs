use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{errors::ModelError, models::domain::ModelResponse};

static FENCE_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^```[a-z0-9_+-]*[ \t]*\r?\n?").expect("FENCE_OPEN is a valid regex pattern")
});

static FENCE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*```\s*$").expect("FENCE_CLOSE is a valid regex pattern"));

/// Collapses any known envelope shape into the completion text.
pub fn extract_text(response: &ModelResponse) -> String {
    match response {
        ModelResponse::Candidates(candidates) => candidates
            .first()
            .and_then(|c| c.content.clone().or_else(|| c.output.clone()))
            .unwrap_or_default(),
        ModelResponse::Output(items) => items
            .iter()
            .map(|item| {
                item.content
                    .as_deref()
                    .or(item.text.as_deref())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join("\n"),
        ModelResponse::Result(result) => result.clone(),
        ModelResponse::Text(text) => text.clone(),
        ModelResponse::Unrecognized => String::new(),
    }
}

/// Removes a surrounding markdown code fence, with or without a language tag.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = match FENCE_OPEN.find(trimmed) {
        Some(m) => &trimmed[m.end()..],
        None => trimmed,
    };
    let without_close = match FENCE_CLOSE.find(without_open) {
        Some(m) => &without_open[..m.start()],
        None => without_open,
    };
    without_close.trim()
}

/// Strict JSON decode of a completion. Malformed output is an expected
/// outcome and comes back as [`ModelError::DecodeFailure`].
pub fn decode_structured(text: &str) -> Result<Value, ModelError> {
    let payload = strip_code_fence(text);
    if payload.is_empty() {
        return Err(ModelError::DecodeFailure("empty payload".to_string()));
    }
    serde_json::from_str(payload).map_err(|e| ModelError::DecodeFailure(e.to_string()))
}
