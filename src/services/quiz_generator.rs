use crate::{
    config::MAX_QUIZ_ATTEMPTS,
    constants::prompts,
    errors::ModelError,
    models::domain::QuizSet,
    services::{
        extraction::{decode_structured, extract_text},
        model_service::{GenerationParams, ModelInvoker},
        validation::validate_quiz,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizGenerationState {
    Attempting(u32),
    Accepted(QuizSet),
    Exhausted,
}

impl QuizGenerationState {
    /// Transition out of `Attempting(n)` given the outcome of that attempt.
    /// Terminal states are returned unchanged.
    pub fn advance(self, outcome: &Result<QuizSet, ModelError>, max_attempts: u32) -> Self {
        match self {
            QuizGenerationState::Attempting(n) => match outcome {
                Ok(quiz) => QuizGenerationState::Accepted(quiz.clone()),
                Err(_) if n < max_attempts => QuizGenerationState::Attempting(n + 1),
                Err(_) => QuizGenerationState::Exhausted,
            },
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, QuizGenerationState::Attempting(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryState {
    pub attempt: u32,
    pub max_attempts: u32,
    pub last_error: Option<ModelError>,
}

impl RetryState {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempt: 0,
            max_attempts,
            last_error: None,
        }
    }
}

/// Runs up to `max_attempts` sequential invoke/extract/decode/validate cycles,
/// switching to the strict prompt after the first failure.
#[derive(Clone)]
pub struct QuizGenerator {
    invoker: ModelInvoker,
    max_attempts: u32,
}

impl QuizGenerator {
    pub fn new(invoker: ModelInvoker, max_attempts: u32) -> Self {
        Self {
            invoker,
            max_attempts: max_attempts.clamp(1, MAX_QUIZ_ATTEMPTS),
        }
    }

    pub async fn generate(&self, text: &str) -> (QuizGenerationState, RetryState) {
        let mut retry = RetryState::new(self.max_attempts);
        let mut state = QuizGenerationState::Attempting(1);

        while let QuizGenerationState::Attempting(n) = state {
            retry.attempt = n;

            let prompt = if n == 1 {
                prompts::quiz_prompt(text)
            } else {
                let previous = retry.last_error.as_ref().map(ToString::to_string);
                prompts::strict_quiz_prompt(text, previous.as_deref())
            };

            let outcome = self.attempt(&prompt).await;
            state = state.advance(&outcome, self.max_attempts);

            match outcome {
                Ok(quiz) => {
                    log::info!("Quiz accepted on attempt {} with {} items", n, quiz.len());
                }
                Err(err) => {
                    let kind = if err.is_invocation_failure() { "call" } else { "output" };
                    if state.is_terminal() {
                        log::warn!("Quiz generation exhausted after {} attempts ({} failed): {}", n, kind, err);
                    } else {
                        log::warn!("Quiz attempt {} {} failed, retrying with strict prompt: {}", n, kind, err);
                    }
                    retry.last_error = Some(err);
                }
            }
        }

        (state, retry)
    }

    async fn attempt(&self, prompt: &str) -> Result<QuizSet, ModelError> {
        let response = self.invoker.invoke(prompt, GenerationParams::QUIZ).await?;

        let text = extract_text(&response);
        if text.trim().is_empty() {
            return Err(ModelError::EmptyCompletion);
        }
        log::debug!("Quiz completion: {}", text);

        let decoded = decode_structured(&text)?;
        validate_quiz(&decoded)
    }
}
