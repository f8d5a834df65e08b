use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as a flat `{"error": "<message>"}` body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("{}", .0.body_text())]
    Upload(#[from] MultipartError),

    #[error("{0}")]
    Extraction(String),

    /// Failure reported by a `ResumeScorer` backend. `HeuristicScorer` never fails.
    #[allow(dead_code)]
    #[error("{0}")]
    Analysis(String),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::UnsupportedFormat => StatusCode::BAD_REQUEST,
            AppError::Upload(e) => e.status(),
            AppError::Extraction(_) | AppError::Analysis(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Extraction(msg) => tracing::error!("Extraction error: {msg}"),
            AppError::Analysis(msg) => tracing::error!("Analysis error: {msg}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            AppError::Upload(e) => tracing::warn!("Rejected upload: {e}"),
            AppError::Validation(_) | AppError::UnsupportedFormat => {}
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
