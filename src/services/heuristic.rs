//! Deterministic, network-free generator used whenever the generative path is
//! unavailable, disabled, or exhausted. Output depends on the input text only.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::{
    quiz_item::QUIZ_TARGET_LEN, QuizItem, QuizSet, ResultSource, SimplificationResult,
};

const EXPLANATION_SENTENCES: usize = 3;
const MAX_KEYWORDS: usize = 10;
const MIN_KEYWORD_CHARS: usize = 6;
const MAX_QUOTED_CHARS: usize = 120;
const PLACEHOLDER_KEYWORD: &str = "concept";

static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("SENTENCE_BREAK is a valid regex pattern"));

/// Splits on `.`, `!` or `?` followed by whitespace, keeping the punctuation.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        // the punctuation is a single ASCII byte
        let sentence = text[start..m.start() + 1].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = m.end();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

pub fn explanation(text: &str) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return text.to_string();
    }
    sentences
        .into_iter()
        .take(EXPLANATION_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokens longer than five characters once non-alphanumerics are stripped,
/// first occurrence order, at most ten.
pub fn keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split_whitespace()
        .map(|token| token.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|word| word.chars().count() >= MIN_KEYWORD_CHARS)
        .filter(|word| seen.insert(word.clone()))
        .take(MAX_KEYWORDS)
        .collect()
}

pub fn quiz(text: &str) -> QuizSet {
    let sentences = split_sentences(text);
    let keywords = keywords(text);

    let items = (0..QUIZ_TARGET_LEN)
        .map(|i| {
            let question = match sentences.get(i) {
                Some(sentence) => format!(
                    "In your own words, what does this mean: \"{}\"",
                    truncate_chars(sentence, MAX_QUOTED_CHARS)
                ),
                None => "What is the main idea of this text?".to_string(),
            };

            let keyword = keywords
                .get(i)
                .or_else(|| keywords.first())
                .map(String::as_str)
                .unwrap_or(PLACEHOLDER_KEYWORD);

            QuizItem {
                question,
                options: vec![
                    keyword.to_string(),
                    format!("{}s", keyword),
                    "an idea".to_string(),
                    "a detail".to_string(),
                ],
                answer_index: 0,
                explanation: String::new(),
            }
        })
        .collect();

    QuizSet::new(items)
}

pub fn simplification(text: &str) -> SimplificationResult {
    SimplificationResult {
        explanation: explanation(text),
        explanation_source: ResultSource::Heuristic,
        quiz: quiz(text),
        source: ResultSource::Heuristic,
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
