use crate::models::domain::{model_response::Candidate, ModelResponse};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A two-item quiz the validator accepts.
    pub fn valid_quiz_json() -> String {
        serde_json::json!({
            "quiz": [
                {
                    "question": "What does the mitochondria produce?",
                    "options": ["Energy", "Proteins", "DNA", "Water"],
                    "answerIndex": 0,
                    "explanation": "Mitochondria produce ATP."
                },
                {
                    "question": "Where is the mitochondria found?",
                    "options": ["In the cell", "In the blood"],
                    "answerIndex": "0"
                }
            ]
        })
        .to_string()
    }

    /// Same shape, but one item repeats an option.
    pub fn duplicate_option_quiz_json() -> String {
        serde_json::json!({
            "quiz": [
                {
                    "question": "Which is a gait?",
                    "options": ["run", "run", "walk", "jump"],
                    "answerIndex": 2,
                    "explanation": ""
                }
            ]
        })
        .to_string()
    }

    pub fn fenced(payload: &str) -> String {
        format!("```json\n{}\n```", payload)
    }

    /// Wraps completion text in the candidates envelope.
    pub fn quiz_envelope(text: &str) -> ModelResponse {
        ModelResponse::Candidates(vec![Candidate {
            content: Some(text.to_string()),
            output: None,
        }])
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::{extraction::decode_structured, validation::validate_quiz};

    #[test]
    fn test_fixtures_valid_quiz_validates() {
        let decoded = decode_structured(&valid_quiz_json()).expect("fixture should decode");
        assert_eq!(validate_quiz(&decoded).expect("fixture should validate").len(), 2);
    }

    #[test]
    fn test_fixtures_duplicate_quiz_is_rejected() {
        let decoded = decode_structured(&duplicate_option_quiz_json()).expect("fixture should decode");
        assert!(validate_quiz(&decoded).is_err());
    }

    #[test]
    fn test_fixtures_fenced_wraps_payload() {
        assert_eq!(fenced("{}"), "```json\n{}\n```");
    }
}
