use std::time::Duration;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::ConfigurationMissing(_) => "CONFIGURATION_MISSING",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigurationMissing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}: {}", self.error_code(), self);
        } else {
            log::debug!("{}: {}", self.error_code(), self);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failures below the orchestrator boundary. None of these reach the caller
/// of the simplify flow; they are absorbed by retry or heuristic fallback.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream timed out after {0:?}")]
    UpstreamTimeout(Duration),

    #[error("Upstream error ({status}): {message}")]
    UpstreamError { status: u16, message: String },

    #[error("Upstream returned an empty completion")]
    EmptyCompletion,

    #[error("Decode failure: {0}")]
    DecodeFailure(String),

    #[error("Validation rejected: {0}")]
    ValidationRejected(String),
}

impl ModelError {
    /// True for failures of the network call itself, as opposed to bad output.
    pub fn is_invocation_failure(&self) -> bool {
        matches!(
            self,
            ModelError::UpstreamUnavailable(_)
                | ModelError::UpstreamTimeout(_)
                | ModelError::UpstreamError { .. }
        )
    }
}
