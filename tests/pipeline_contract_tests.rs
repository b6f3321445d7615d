use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::{Notify, RwLock};

use feynman_server::{
    config::MAX_QUIZ_ATTEMPTS,
    constants::prompts::{QUIZ_INSTRUCTIONS, QUIZ_RETRY_PREAMBLE, SIMPLIFY_INSTRUCTIONS},
    errors::ModelError,
    models::domain::{ModelResponse, QuizItem, ResultSource},
    services::{
        define_service::DefineService,
        heuristic,
        model_service::{GenerationParams, ModelInvoker, TextModel},
        quiz_generator::{QuizGenerationState, QuizGenerator},
        simplify_service::SimplifyService,
    },
};

/// Replays queued responses per prompt kind and records every prompt it sees.
struct ScriptedModel {
    explanations: RwLock<VecDeque<Result<ModelResponse, ModelError>>>,
    quizzes: RwLock<VecDeque<Result<ModelResponse, ModelError>>>,
    prompts: RwLock<Vec<String>>,
}

impl ScriptedModel {
    fn new() -> Self {
        Self {
            explanations: RwLock::new(VecDeque::new()),
            quizzes: RwLock::new(VecDeque::new()),
            prompts: RwLock::new(Vec::new()),
        }
    }

    async fn push_explanation(&self, response: Result<ModelResponse, ModelError>) {
        self.explanations.write().await.push_back(response);
    }

    async fn push_quiz(&self, response: Result<ModelResponse, ModelError>) {
        self.quizzes.write().await.push_back(response);
    }

    async fn quiz_prompts(&self) -> Vec<String> {
        self.prompts
            .read()
            .await
            .iter()
            .filter(|p| p.contains(QUIZ_INSTRUCTIONS))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn generate(
        &self,
        prompt: &str,
        _params: GenerationParams,
    ) -> Result<ModelResponse, ModelError> {
        self.prompts.write().await.push(prompt.to_string());

        let queue = if prompt.starts_with(SIMPLIFY_INSTRUCTIONS) {
            &self.explanations
        } else {
            &self.quizzes
        };

        queue
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::UpstreamUnavailable("script exhausted".to_string())))
    }
}

/// Sets its flag when the future holding it is dropped.
struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Explains immediately but never finishes a quiz call.
struct StalledQuizModel {
    quiz_calls: AtomicUsize,
    quiz_started: Notify,
    quiz_dropped: Arc<AtomicBool>,
}

impl StalledQuizModel {
    fn new() -> Self {
        Self {
            quiz_calls: AtomicUsize::new(0),
            quiz_started: Notify::new(),
            quiz_dropped: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl TextModel for StalledQuizModel {
    async fn generate(
        &self,
        prompt: &str,
        _params: GenerationParams,
    ) -> Result<ModelResponse, ModelError> {
        if prompt.starts_with(SIMPLIFY_INSTRUCTIONS) {
            return Ok(ModelResponse::Text("Simple.".to_string()));
        }

        self.quiz_calls.fetch_add(1, Ordering::SeqCst);
        let _guard = DropFlag(Arc::clone(&self.quiz_dropped));
        self.quiz_started.notify_one();
        std::future::pending::<()>().await;
        Ok(ModelResponse::Unrecognized)
    }
}

fn text(body: &str) -> Result<ModelResponse, ModelError> {
    Ok(ModelResponse::Text(body.to_string()))
}

fn good_quiz() -> String {
    json!({
        "quiz": [
            { "question": "What is ATP?", "options": ["Energy currency", "A protein"], "answerIndex": 0 },
            { "question": "Who makes ATP?", "options": ["Mitochondria", "Ribosomes", "Golgi"], "answerIndex": 0, "explanation": "Cellular respiration." }
        ]
    })
    .to_string()
}

fn simplify_service(model: Arc<ScriptedModel>) -> SimplifyService {
    SimplifyService::new(
        Some(ModelInvoker::new(model, Duration::from_secs(1))),
        MAX_QUIZ_ATTEMPTS,
    )
}

const TEXT: &str = "The mitochondria is the powerhouse of the cell. It converts nutrients into energy.";

#[tokio::test]
async fn fenced_quiz_is_accepted_on_first_attempt() {
    let model = Arc::new(ScriptedModel::new());
    model.push_explanation(text("Cells have tiny power plants.")).await;
    model.push_quiz(text(&format!("```json\n{}\n```", good_quiz()))).await;

    let result = simplify_service(model.clone())
        .simplify(TEXT)
        .await
        .expect("simplify should not fail");

    assert_eq!(result.explanation, "Cells have tiny power plants.");
    assert_eq!(result.source, ResultSource::Generated);
    assert_eq!(result.quiz.len(), 2);
    assert_eq!(model.quiz_prompts().await.len(), 1);
}

#[tokio::test]
async fn duplicate_options_advance_to_strict_prompt() {
    let duplicate = json!({
        "quiz": [{ "question": "Gait?", "options": ["run", "run", "walk", "jump"], "answerIndex": 0 }]
    })
    .to_string();

    let model = Arc::new(ScriptedModel::new());
    model.push_explanation(text("Simple.")).await;
    model.push_quiz(text(&duplicate)).await;
    model.push_quiz(text(&good_quiz())).await;

    let result = simplify_service(model.clone())
        .simplify(TEXT)
        .await
        .expect("simplify should not fail");

    let prompts = model.quiz_prompts().await;
    assert_eq!(prompts.len(), 2);
    assert!(!prompts[0].contains(QUIZ_RETRY_PREAMBLE));
    assert!(prompts[1].contains(QUIZ_RETRY_PREAMBLE));
    assert_eq!(result.source, ResultSource::Generated);
}

#[tokio::test]
async fn never_more_than_three_quiz_attempts() {
    let model = Arc::new(ScriptedModel::new());
    model.push_explanation(text("Simple.")).await;
    for _ in 0..5 {
        model.push_quiz(text("I cannot produce JSON today.")).await;
    }

    let result = simplify_service(model.clone())
        .simplify(TEXT)
        .await
        .expect("simplify should not fail");

    assert_eq!(model.quiz_prompts().await.len(), 3);
    assert_eq!(result.source, ResultSource::Heuristic);
    assert_eq!(result.quiz, heuristic::quiz(TEXT));
    assert_eq!(result.explanation, "Simple.");
}

#[tokio::test]
async fn total_upstream_failure_still_yields_usable_output() {
    let model = Arc::new(ScriptedModel::new());

    let result = simplify_service(model)
        .simplify(TEXT)
        .await
        .expect("simplify should not fail");

    assert!(!result.explanation.is_empty());
    assert!((1..=10).contains(&result.quiz.len()));
    assert_eq!(result.explanation_source, ResultSource::Heuristic);
    assert_eq!(result.source, ResultSource::Heuristic);
}

#[tokio::test]
async fn accepted_items_are_always_well_formed() {
    let model = Arc::new(ScriptedModel::new());
    let quiz = json!({
        "quiz": [{
            "question": "  Pick one  ",
            "options": [" a ", "b", "c", "d", "e", "f"],
            "answerIndex": "1",
            "explanation": null
        }]
    })
    .to_string();
    model.push_quiz(text(&quiz)).await;

    let generator = QuizGenerator::new(ModelInvoker::new(model, Duration::from_secs(1)), MAX_QUIZ_ATTEMPTS);
    let (state, retry) = generator.generate(TEXT).await;

    let QuizGenerationState::Accepted(quiz) = state else {
        panic!("expected an accepted quiz, got {:?}", state);
    };
    assert_eq!(retry.attempt, 1);
    assert!(quiz.items().iter().all(QuizItem::is_well_formed));
    assert_eq!(quiz.items()[0].question, "Pick one");
    assert_eq!(quiz.items()[0].options, vec!["a", "b", "c", "d"]);
    assert_eq!(quiz.items()[0].answer_index, 1);
    assert_eq!(quiz.items()[0].explanation, "");
}

#[tokio::test]
async fn define_lower_case_match_for_requested_word() {
    let model = Arc::new(ScriptedModel::new());
    model
        .push_quiz(Ok(ModelResponse::Result(
            json!({ "photosynthesis": "Turning light into sugar." }).to_string(),
        )))
        .await;

    let service = DefineService::new(Some(ModelInvoker::new(model, Duration::from_secs(1))));
    let result = service
        .define(vec!["Photosynthesis".to_string(), "Osmosis".to_string()])
        .await
        .expect("define should succeed");

    assert_eq!(result.definitions["Photosynthesis"], "Turning light into sugar.");
    assert_eq!(result.definitions["Osmosis"], "");
}

#[tokio::test]
async fn dropping_quiz_generation_cancels_the_pending_call() {
    let model = Arc::new(StalledQuizModel::new());
    // deadline far beyond the caller's patience
    let generator = QuizGenerator::new(
        ModelInvoker::new(model.clone(), Duration::from_secs(60)),
        MAX_QUIZ_ATTEMPTS,
    );

    let outcome = tokio::time::timeout(Duration::from_millis(50), generator.generate(TEXT)).await;

    assert!(outcome.is_err());
    assert_eq!(model.quiz_calls.load(Ordering::SeqCst), 1);
    assert!(model.quiz_dropped.load(Ordering::SeqCst));
}

#[tokio::test]
async fn aborted_simplify_skips_remaining_attempts() {
    let model = Arc::new(StalledQuizModel::new());
    let service = Arc::new(SimplifyService::new(
        Some(ModelInvoker::new(model.clone(), Duration::from_secs(60))),
        MAX_QUIZ_ATTEMPTS,
    ));

    let task = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.simplify(TEXT).await }
    });

    model.quiz_started.notified().await;
    task.abort();
    let joined = task.await;

    assert!(joined.is_err_and(|err| err.is_cancelled()));
    assert!(model.quiz_dropped.load(Ordering::SeqCst));

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(model.quiz_calls.load(Ordering::SeqCst), 1);
}
