// src/error.rs
// Request-level error taxonomy and the JSON envelope every failure maps to.
// Provider failures are classified at the client boundary (src/llm) and
// converted here; internal errors never leak their details to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::llm::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or out-of-range input, with field-level detail.
    #[error("{0}")]
    Validation(String),

    /// Missing authentication on a route that requires it.
    #[error("Authentication required")]
    Unauthorized,

    /// Conversation absent, inactive, or owned by someone else.
    #[error("{0}")]
    NotFound(String),

    /// The model provider rejected our credentials.
    #[error("Model provider authentication failed")]
    UpstreamAuth,

    /// The model provider throttled us; the caller may retry later.
    #[error("Rate limit exceeded. Please try again later.")]
    UpstreamRateLimit,

    /// The model provider rejected the request payload.
    #[error("Invalid request to the model provider")]
    UpstreamBadRequest,

    /// Any other provider failure.
    #[error("Failed to generate response")]
    Upstream,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamAuth => StatusCode::BAD_GATEWAY,
            AppError::UpstreamRateLimit => StatusCode::TOO_MANY_REQUESTS,
            AppError::UpstreamBadRequest => StatusCode::BAD_REQUEST,
            AppError::Upstream => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Auth => AppError::UpstreamAuth,
            ProviderError::RateLimited => AppError::UpstreamRateLimit,
            ProviderError::BadRequest => AppError::UpstreamBadRequest,
            ProviderError::Other(detail) => {
                // Raw provider error bodies stay in the logs, not the response.
                error!("provider failure: {}", detail);
                AppError::Upstream
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(ref err) = self {
            error!("internal error: {:?}", err);
        }

        let status = self.status_code();
        let body = json!({
            "status": "error",
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

/// Result type alias for request handlers and the chat service.
pub type AppResult<T> = Result<T, AppError>;
