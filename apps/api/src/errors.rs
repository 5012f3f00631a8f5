use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is terminal for the current request only; none aborts the
/// process, and none ever writes to the result store.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport or provider-side failure. Carries the provider's own
    /// message when it supplied one.
    #[error("{0}")]
    Provider(String),

    /// The provider answered 200 but the body did not match the declared
    /// shape. The parse detail is logged where the error is classified; the
    /// client only ever sees the generic message.
    #[error("Analysis failed. Please try again.")]
    MalformedResponse,

    #[error("The analysis did not complete within {}s. Please try again.", .0.as_secs())]
    ProviderTimeout(Duration),

    #[error("An analysis is already in progress")]
    AnalysisInFlight,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Api { message, .. } if !message.trim().is_empty() => {
                AppError::Provider(message)
            }
            LlmError::Api { .. } | LlmError::Http(_) => AppError::Provider(
                "The analysis service is unavailable. Please try again.".to_string(),
            ),
            LlmError::Timeout(limit) => AppError::ProviderTimeout(limit),
            LlmError::Parse(detail) => {
                tracing::warn!("Failed to parse provider response: {detail}");
                AppError::MalformedResponse
            }
            LlmError::EmptyContent => {
                tracing::warn!("Provider returned no content");
                AppError::MalformedResponse
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Provider(msg) => {
                tracing::error!("Provider error: {msg}");
                (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", msg.clone())
            }
            AppError::MalformedResponse => (
                StatusCode::BAD_GATEWAY,
                "MALFORMED_RESPONSE",
                self.to_string(),
            ),
            AppError::ProviderTimeout(_) => (
                StatusCode::GATEWAY_TIMEOUT,
                "PROVIDER_TIMEOUT",
                self.to_string(),
            ),
            AppError::AnalysisInFlight => {
                (StatusCode::CONFLICT, "ANALYSIS_IN_FLIGHT", self.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
