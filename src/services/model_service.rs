use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use crate::{errors::ModelError, models::domain::ModelResponse};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationParams {
    pub const SIMPLIFY: Self = Self {
        temperature: 0.2,
        max_output_tokens: 512,
    };
    pub const QUIZ: Self = Self {
        temperature: 0.3,
        max_output_tokens: 1024,
    };
    pub const DEFINE: Self = Self {
        temperature: 0.0,
        max_output_tokens: 256,
    };
}

/// One call to a generative-text backend. Implementations must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<ModelResponse, ModelError>;
}

/// Wraps a [`TextModel`] with the hard deadline. On expiry the in-flight
/// future is dropped, which cancels the underlying request.
#[derive(Clone)]
pub struct ModelInvoker {
    model: Arc<dyn TextModel>,
    timeout: Duration,
}

impl ModelInvoker {
    pub fn new(model: Arc<dyn TextModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    pub async fn invoke(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<ModelResponse, ModelError> {
        match tokio::time::timeout(self.timeout, self.model.generate(prompt, params)).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("Generative call exceeded {:?}; cancelled", self.timeout);
                Err(ModelError::UpstreamTimeout(self.timeout))
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateTextRequest<'a> {
    prompt: PromptText<'a>,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct PromptText<'a> {
    text: &'a str,
}

/// Google generative-language `generateText` endpoint over HTTP.
pub struct GeminiTextModel {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    timeout: Duration,
}

impl GeminiTextModel {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ModelError::UpstreamUnavailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            timeout,
        })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::UpstreamTimeout(self.timeout)
        } else if let Some(status) = err.status() {
            ModelError::UpstreamError {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ModelError::UpstreamUnavailable(err.to_string())
        }
    }
}

#[async_trait]
impl TextModel for GeminiTextModel {
    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<ModelResponse, ModelError> {
        let body = GenerateTextRequest {
            prompt: PromptText { text: prompt },
            temperature: params.temperature,
            max_output_tokens: params.max_output_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to reach generative API: {}", e);
                self.map_transport_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response body".to_string());
            log::error!("Generative API returned {}: {}", status, message);
            return Err(ModelError::UpstreamError {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Value = response.json().await.map_err(|e| ModelError::UpstreamError {
            status: status.as_u16(),
            message: format!("Failed to parse response body: {}", e),
        })?;
        log::debug!("Generative API envelope: {}", envelope);

        Ok(ModelResponse::from(envelope))
    }
}
