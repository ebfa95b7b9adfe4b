//! Error types for the Rental House server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Mail transport error: {0}")]
    Mail(String),

    #[error("PDF rendering error: {0}")]
    Pdf(String),

    #[error("Invalid confirmation link: {0}")]
    InvalidToken(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Set on recoverable errors that offer a fallback action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, recovery) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NotFound", msg.clone(), None),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "Validation", msg.clone(), None)
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BadRequest", msg.clone(), None)
            }
            AppError::Feed(msg) => {
                tracing::error!("Feed error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Feed",
                    "Equipment feed unavailable".to_string(),
                    None,
                )
            }
            AppError::Mail(msg) => {
                tracing::error!("Mail transport error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Mail",
                    "Failed to send the booking email. Please try again or download the PDF manually.".to_string(),
                    Some("download_pdf".to_string()),
                )
            }
            AppError::Pdf(msg) => {
                tracing::error!("PDF rendering error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Pdf",
                    "Failed to generate the booking document".to_string(),
                    None,
                )
            }
            AppError::InvalidToken(msg) => (
                StatusCode::BAD_REQUEST,
                "InvalidToken",
                format!("Invalid booking link: {}. The link may be corrupted.", msg),
                None,
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
            recovery,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
