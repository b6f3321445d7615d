use crate::{
    constants::prompts,
    errors::{AppError, AppResult},
    models::domain::{ResultSource, SimplificationResult},
    services::{
        extraction::extract_text,
        heuristic,
        model_service::{GenerationParams, ModelInvoker},
        quiz_generator::{QuizGenerationState, QuizGenerator},
    },
};

struct GenerativePipeline {
    invoker: ModelInvoker,
    quiz_generator: QuizGenerator,
}

/// Simplify + quiz orchestration. Never fails except on blank input.
pub struct SimplifyService {
    pipeline: Option<GenerativePipeline>,
}

impl SimplifyService {
    pub fn new(invoker: Option<ModelInvoker>, max_quiz_attempts: u32) -> Self {
        let pipeline = invoker.map(|invoker| GenerativePipeline {
            quiz_generator: QuizGenerator::new(invoker.clone(), max_quiz_attempts),
            invoker,
        });
        Self { pipeline }
    }

    pub fn heuristic_only() -> Self {
        Self { pipeline: None }
    }

    pub fn is_generative(&self) -> bool {
        self.pipeline.is_some()
    }

    pub async fn simplify(&self, text: &str) -> AppResult<SimplificationResult> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidInput("Missing text in request body".to_string()));
        }

        let Some(pipeline) = &self.pipeline else {
            log::info!("No generative backend configured; serving heuristic result");
            return Ok(heuristic::simplification(text));
        };

        let (explanation, explanation_source) = match Self::generate_explanation(pipeline, text).await {
            Some(explanation) => (explanation, ResultSource::Generated),
            None => (heuristic::explanation(text), ResultSource::Heuristic),
        };

        let (quiz, source) = match pipeline.quiz_generator.generate(text).await {
            (QuizGenerationState::Accepted(quiz), _) => (quiz, ResultSource::Generated),
            (_, retry) => {
                log::warn!(
                    "Falling back to heuristic quiz after {} of {} attempts",
                    retry.attempt,
                    retry.max_attempts
                );
                (heuristic::quiz(text), ResultSource::Heuristic)
            }
        };

        Ok(SimplificationResult {
            explanation,
            explanation_source,
            quiz,
            source,
        })
    }

    /// Single call, no retry. `None` means the heuristic explanation is used.
    async fn generate_explanation(pipeline: &GenerativePipeline, text: &str) -> Option<String> {
        let response = match pipeline
            .invoker
            .invoke(&prompts::simplify_prompt(text), GenerationParams::SIMPLIFY)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                log::warn!("Explanation generation failed, using heuristic: {}", err);
                return None;
            }
        };

        let explanation = extract_text(&response).trim().to_string();
        if explanation.is_empty() {
            log::warn!("Explanation generation returned no text, using heuristic");
            return None;
        }
        Some(explanation)
    }
}
