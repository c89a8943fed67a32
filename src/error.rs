//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::seasons::InvalidMonthDay;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No pricing information found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid seasonal rate data: {0}")]
    SeasonData(#[from] InvalidMonthDay),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::SeasonData(e) => {
                tracing::error!("Invalid seasonal rate data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Invalid seasonal pricing data".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        (status, Json(PricingErrorResponse { error: message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
