use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{
    constants::prompts,
    errors::{AppError, AppResult},
    models::domain::DefinitionResult,
    services::{
        extraction::{decode_structured, extract_text},
        model_service::{GenerationParams, ModelInvoker},
        validation::resolve_definitions,
    },
};

static DEFINITION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"?([^":]+)"?\s*[:\-]\s*(.+)$"#).expect("DEFINITION_LINE is a valid regex pattern")
});

pub struct DefineService {
    invoker: Option<ModelInvoker>,
}

impl DefineService {
    pub fn new(invoker: Option<ModelInvoker>) -> Self {
        Self { invoker }
    }

    pub async fn define(&self, words: Vec<String>) -> AppResult<DefinitionResult> {
        if words.is_empty() {
            return Err(AppError::InvalidInput("No word(s) provided".to_string()));
        }

        let invoker = self.invoker.as_ref().ok_or_else(|| {
            AppError::ConfigurationMissing(
                "Server not configured with Google Gemini API key".to_string(),
            )
        })?;

        let response = match invoker
            .invoke(&prompts::define_prompt(&words), GenerationParams::DEFINE)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                log::warn!("Definition lookup failed for {} word(s): {}", words.len(), err);
                return Ok(DefinitionResult::empty_for(&words));
            }
        };

        let raw = extract_text(&response);
        let parsed = parse_definitions(&raw);

        Ok(DefinitionResult {
            definitions: resolve_definitions(&words, &parsed),
            raw,
        })
    }
}

/// JSON object first; otherwise `word: definition` lines.
pub fn parse_definitions(text: &str) -> HashMap<String, String> {
    match decode_structured(text) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(word, definition)| match definition {
                Value::String(definition) => Some((word, definition)),
                _ => None,
            })
            .collect(),
        Ok(_) => HashMap::new(),
        Err(err) => {
            log::debug!("Definitions were not JSON ({}), parsing lines", err);
            parse_definition_lines(text)
        }
    }
}

fn parse_definition_lines(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let caps = DEFINITION_LINE.captures(line)?;
            Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
        })
        .collect()
}
