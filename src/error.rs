use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::image_gen::ImageGenError;
use crate::storage::StorageError;

pub const MISSING_PROMPT: &str = "Missing 'prompt' in request body";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("Request failed: {status}")]
    Upstream { status: u16, body: String },

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ImageGenError> for AppError {
    fn from(err: ImageGenError) -> Self {
        match err {
            ImageGenError::Upstream { status, body } => AppError::Upstream { status, body },
            ImageGenError::Transport(e) => AppError::Internal(anyhow::Error::new(e)),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    pub fn missing_prompt() -> Self {
        AppError::Validation(MISSING_PROMPT.to_string())
    }

    /// Render the error, exposing internal messages only when `debug` is set.
    pub fn into_response_with(self, debug: bool) -> Response {
        let (status, error_message, details) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::InvalidBody(details) => (
                StatusCode::BAD_REQUEST,
                "Invalid JSON body".to_string(),
                Some(details),
            ),
            AppError::Upstream { status, body } => {
                warn!("Image generation upstream returned {}", status);
                let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (code, format!("Request failed: {}", status), Some(body))
            }
            err @ (AppError::Translation(_) | AppError::Internal(_)) => {
                error!("Request failed: {}", err_chain(&err));
                let message = if debug {
                    err.to_string()
                } else {
                    "Internal server error".to_string()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message, None)
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
                details,
            }),
        )
            .into_response()
    }
}

fn err_chain(err: &AppError) -> String {
    match err {
        AppError::Internal(inner) => format!("{:#}", inner),
        other => other.to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}
