use crate::models::domain::quiz_item::{QuizPayload, MAX_OPTIONS, QUIZ_TARGET_LEN};

pub const SIMPLIFY_INSTRUCTIONS: &str = "Please simplify the following text for a general audience. Keep the meaning but use short, clear sentences and plain words. Output only the simplified explanation.";

pub const QUIZ_INSTRUCTIONS: &str = "You are a tutor applying the Feynman technique. Write multiple-choice questions that check whether a reader understood the text below.

Rules:
- Each question has between 2 and 4 options.
- Options within a question must all be different.
- answerIndex is the zero-based index of the single correct option.
- explanation is one short sentence saying why the answer is correct.
- Output ONLY a JSON object of the form {\"quiz\": [{\"question\": string, \"options\": [string], \"answerIndex\": number, \"explanation\": string}]}. No prose, no markdown.";

pub const QUIZ_RETRY_PREAMBLE: &str = "Your previous response could not be parsed or did not match the required structure. Return ONLY a JSON object that validates against the JSON schema below. Do not wrap it in markdown, do not add commentary, do not repeat options within a question.";

pub const DEFINE_INSTRUCTIONS: &str = "Provide concise, one-sentence plain-language definitions for the following words. Return JSON object mapping each word to its definition.";

pub fn simplify_prompt(text: &str) -> String {
    format!("{} Text:\n\n\"{}\"", SIMPLIFY_INSTRUCTIONS, text)
}

pub fn quiz_prompt(text: &str) -> String {
    format!(
        "{}\n\nWrite exactly {} questions with {} options each.\n\nText:\n\n\"{}\"",
        QUIZ_INSTRUCTIONS, QUIZ_TARGET_LEN, MAX_OPTIONS, text
    )
}

/// Prompt for attempts after the first. Restates the schema and the reason the
/// previous output was refused.
pub fn strict_quiz_prompt(text: &str, previous_failure: Option<&str>) -> String {
    let reason = previous_failure
        .map(|r| format!("\n\nProblem with the previous response: {}", r))
        .unwrap_or_default();

    format!(
        "{}{}\n\nJSON schema:\n{}\n\n{}",
        QUIZ_RETRY_PREAMBLE,
        reason,
        quiz_schema(),
        quiz_prompt(text)
    )
}

pub fn define_prompt(words: &[String]) -> String {
    format!("{} Words: {}", DEFINE_INSTRUCTIONS, words.join(", "))
}

pub fn quiz_schema() -> String {
    let schema = schemars::schema_for!(QuizPayload);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
