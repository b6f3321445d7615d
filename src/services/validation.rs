use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::Value;

use crate::{
    errors::ModelError,
    models::domain::{
        quiz_item::{MAX_OPTIONS, MIN_OPTIONS, QUIZ_MAX_ITEMS},
        QuizItem, QuizSet,
    },
};

/// Checks a decoded quiz object and normalizes it. One nonconforming item
/// rejects the whole batch.
pub fn validate_quiz(decoded: &Value) -> Result<QuizSet, ModelError> {
    let items = decoded
        .get("quiz")
        .and_then(Value::as_array)
        .ok_or_else(|| reject("top-level `quiz` must be an array"))?;

    if items.is_empty() {
        return Err(reject("`quiz` must contain at least one item"));
    }

    let quiz = items
        .iter()
        .take(QUIZ_MAX_ITEMS)
        .enumerate()
        .map(|(index, item)| validate_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuizSet::new(quiz))
}

fn validate_item(index: usize, item: &Value) -> Result<QuizItem, ModelError> {
    let question = item
        .get("question")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| reject(format!("item {}: `question` must be a non-empty string", index)))?;

    let raw_options = item
        .get("options")
        .and_then(Value::as_array)
        .filter(|options| options.len() >= MIN_OPTIONS)
        .ok_or_else(|| {
            reject(format!(
                "item {}: `options` must be an array of at least {} entries",
                index, MIN_OPTIONS
            ))
        })?;

    let mut options = Vec::with_capacity(raw_options.len());
    let mut seen = HashSet::new();
    for option in raw_options {
        let option = option
            .as_str()
            .map(str::trim)
            .ok_or_else(|| reject(format!("item {}: every option must be a string", index)))?;
        if !seen.insert(option) {
            return Err(reject(format!("item {}: duplicate option '{}'", index, option)));
        }
        options.push(option.to_string());
    }
    options.truncate(MAX_OPTIONS);

    let answer_index = item
        .get("answerIndex")
        .and_then(coerce_index)
        .ok_or_else(|| reject(format!("item {}: `answerIndex` must be a non-negative integer", index)))?;

    if answer_index >= options.len() {
        return Err(reject(format!(
            "item {}: `answerIndex` {} is out of range for {} options",
            index,
            answer_index,
            options.len()
        )));
    }

    Ok(QuizItem {
        question: question.to_string(),
        options,
        answer_index,
        explanation: coerce_string(item.get("explanation")),
    })
}

fn coerce_index(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(i) => usize::try_from(i).ok(),
            None => n
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as usize),
        },
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn reject(reason: impl Into<String>) -> ModelError {
    ModelError::ValidationRejected(reason.into())
}

/// Lenient contract of the define flow: every requested word is present in the
/// result. Lookup tries the literal key, then lower-case, then upper-case.
pub fn resolve_definitions(
    words: &[String],
    parsed: &HashMap<String, String>,
) -> BTreeMap<String, String> {
    words
        .iter()
        .map(|word| {
            let definition = parsed
                .get(word)
                .or_else(|| parsed.get(&word.to_lowercase()))
                .or_else(|| parsed.get(&word.to_uppercase()))
                .cloned()
                .unwrap_or_default();
            (word.clone(), definition)
        })
        .collect()
}
