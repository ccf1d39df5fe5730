use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// Duplicate username/email at registration. The payload is internal
    /// detail for logs; clients always get the same non-specific message.
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Any authentication/authorization failure. The payload is internal
    /// detail for logs; clients always get the same message so that wrong
    /// password, unknown user, bad token and wrong role are
    /// indistinguishable.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not found")]
    NotFound,
    /// Storage failure: retryable for the caller, never retried here.
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Classify a repository failure: storage faults map to the retryable
    /// 503 class, everything else is a 500.
    pub fn from_repo(err: anyhow::Error) -> Self {
        match err.downcast::<sqlx::Error>() {
            Ok(db_err) => AppError::DatabaseError(db_err),
            Err(other) => AppError::InternalServerError(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(detail) => {
                tracing::warn!("Registration conflict: {}", detail);
                (
                    StatusCode::BAD_REQUEST,
                    "Username or email already exists".to_string(),
                )
            }
            AppError::Unauthorized(detail) => {
                tracing::warn!("Unauthorized: {}", detail);
                (
                    StatusCode::UNAUTHORIZED,
                    "Invalid credentials or token".to_string(),
                )
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service unavailable".to_string(),
                )
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({
            "errors": [
                {
                    "status": status.as_u16(),
                    "detail": message
                }
            ]
        });

        (status, Json(body)).into_response()
    }
}

/// Error body shape, documented for OpenAPI
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<ApiErrorObject>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ApiErrorObject {
    pub status: u16,
    pub detail: String,
}
