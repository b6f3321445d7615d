use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::domain::{DefinitionResult, QuizItem, ResultSource, SimplificationResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyResponse {
    pub explanation: String,
    pub quiz: Vec<QuizItem>,
    pub source: ResultSource,
    pub explanation_source: ResultSource,
}

impl From<SimplificationResult> for SimplifyResponse {
    fn from(result: SimplificationResult) -> Self {
        SimplifyResponse {
            explanation: result.explanation,
            quiz: result.quiz.into_inner(),
            source: result.source,
            explanation_source: result.explanation_source,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DefineResponse {
    pub definitions: BTreeMap<String, String>,
    pub raw: String,
}

impl From<DefinitionResult> for DefineResponse {
    fn from(result: DefinitionResult) -> Self {
        DefineResponse {
            definitions: result.definitions,
            raw: result.raw,
        }
    }
}
