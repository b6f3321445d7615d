use serde::Deserialize;
use validator::{Validate, ValidationError};

pub const MAX_DEFINE_WORDS: u64 = 50;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SimplifyRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,
}

/// Accepts either `{ "words": [...] }` or the single-word sugar `{ "word": "..." }`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DefineRequest {
    #[serde(default)]
    #[validate(length(max = MAX_DEFINE_WORDS))]
    pub words: Option<Vec<String>>,

    #[serde(default)]
    pub word: Option<String>,
}

impl DefineRequest {
    /// Requested words with blank entries dropped. `word` wins over `words`.
    pub fn into_words(self) -> Vec<String> {
        let words = match self.word {
            Some(word) => vec![word],
            None => self.words.unwrap_or_default(),
        };
        words.into_iter().filter(|w| !w.trim().is_empty()).collect()
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Missing text in request body".into());
        return Err(err);
    }
    Ok(())
}
