use serde::{Deserialize, Serialize};

use crate::models::domain::QuizSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Generated, // produced by the generative-text service and validated
    Heuristic, // produced by the deterministic fallback
}

/// Outcome of one simplify request. The explanation and the quiz come from
/// independent sub-pipelines, so each carries its own source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimplificationResult {
    pub explanation: String,
    pub explanation_source: ResultSource,
    pub quiz: QuizSet,
    pub source: ResultSource,
}
