use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    UnauthenticatedError(String),
    #[error("{0}")]
    ForbiddenOperation(String),
    #[error("{0}")]
    ExternalServiceError(String),
    #[error("{0}")]
    RoleRecordUnavailable(String),
    #[error("{0}")]
    CompensationFailed(String),
    #[error("database operation failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("{0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("key-value store operation failed")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("unexpected error happened")]
    UnexpectedError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthenticatedError(_) => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenOperation(_) => StatusCode::FORBIDDEN,
            AppError::ExternalServiceError(_)
            | AppError::RoleRecordUnavailable(_)
            | AppError::CompensationFailed(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::ConversionEntityError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
        } else {
            tracing::warn!(
                error.message = %self,
                "Request rejected"
            );
        }

        // The Display impls never carry internals, so the body is safe to
        // hand back to the client as-is.
        (
            status_code,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

impl From<garde::Report> for AppError {
    fn from(value: garde::Report) -> Self {
        // The first violation decides the response message.
        let message = value
            .iter()
            .next()
            .map(|(path, error)| format!("{path}: {error}"))
            .unwrap_or_else(|| value.to_string());
        Self::ValidationError(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::ValidationError(value.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
