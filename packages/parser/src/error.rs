use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::pipeline::PipelineError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`, `FETCH_FAILED`,
    /// `QUEUE_UNAVAILABLE`, `INTERNAL_ERROR`.
    #[schema(example = "FETCH_FAILED")]
    pub code: &'static str,
    /// Human-readable error description.
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    /// The target document could not be retrieved.
    FetchFailed(String),
    /// Queued parsing was requested but no broker is configured.
    QueueUnavailable,
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::FetchFailed(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    code: "FETCH_FAILED",
                    message: msg,
                },
            ),
            AppError::QueueUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody {
                    code: "QUEUE_UNAVAILABLE",
                    message: "Task queue is not available".into(),
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Fetch(e) => {
                tracing::warn!("Fetch failed: {e}");
                AppError::FetchFailed(e.to_string())
            }
            PipelineError::Database(e) => e.into(),
        }
    }
}

impl From<mq::MqError> for AppError {
    fn from(err: mq::MqError) -> Self {
        AppError::Internal(format!("Failed to enqueue parse job: {err}"))
    }
}
