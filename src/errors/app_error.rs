use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::core::TwimlError;

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum AppError {
    /// The request could not be understood
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The server failed to produce a response
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TwimlError> for AppError {
    fn from(err: TwimlError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
