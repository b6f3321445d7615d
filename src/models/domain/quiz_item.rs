use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const QUIZ_TARGET_LEN: usize = 5;
pub const QUIZ_MAX_ITEMS: usize = 10;
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 4;

/// One multiple-choice question. `answer_index` points into `options`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
    #[serde(default)]
    pub explanation: String, // may be empty
}

impl QuizItem {
    /// Structural contract of an accepted item: non-empty question, 2 to 4
    /// options distinct after trimming, answer index in range.
    pub fn is_well_formed(&self) -> bool {
        if self.question.trim().is_empty() {
            return false;
        }
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&self.options.len()) {
            return false;
        }
        let mut seen = HashSet::new();
        if !self.options.iter().all(|o| seen.insert(o.trim())) {
            return false;
        }
        self.answer_index < self.options.len()
    }
}

/// Shape the model is asked to return. Only used to render the JSON schema
/// embedded in quiz prompts.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct QuizPayload {
    pub quiz: Vec<QuizItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuizSet(Vec<QuizItem>);

impl QuizSet {
    pub fn new(items: Vec<QuizItem>) -> Self {
        Self(items)
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<QuizItem> {
        self.0
    }
}
