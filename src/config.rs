use std::{env, time::Duration};

use secrecy::SecretString;

pub const DEFAULT_GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta2/models/text-bison-001:generateText";
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 20;
pub const MAX_QUIZ_ATTEMPTS: u32 = 3;

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: Option<SecretString>,
    pub gemini_endpoint: String,
    pub model_timeout_secs: u64,
    pub quiz_max_attempts: u32,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// The model deadline and the quiz attempt count are fixed. Tests that need
    /// shorter values build `Config` directly.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env::var("GOOGLE_GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            gemini_endpoint: env::var("GEMINI_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_GEMINI_ENDPOINT.to_string()),
            model_timeout_secs: DEFAULT_MODEL_TIMEOUT_SECS,
            quiz_max_attempts: MAX_QUIZ_ATTEMPTS,
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
        }
    }

    pub fn has_model_credential(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    /// Checks settings that must hold before serving traffic.
    /// Panics if the model endpoint is not an http(s) URL.
    pub fn validate_for_production(&self) {
        if !self.gemini_endpoint.starts_with("http://")
            && !self.gemini_endpoint.starts_with("https://")
        {
            panic!(
                "FATAL: GEMINI_ENDPOINT must be an http(s) URL, got '{}'.",
                self.gemini_endpoint
            );
        }

        if !self.has_model_credential() {
            log::warn!(
                "GOOGLE_GEMINI_API_KEY is not set: /api/simplify will serve heuristic results and /api/define will fail"
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            gemini_api_key: None,
            gemini_endpoint: "http://127.0.0.1:9/generateText".to_string(),
            model_timeout_secs: 1,
            quiz_max_attempts: MAX_QUIZ_ATTEMPTS,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: None,
        }
    }
}
