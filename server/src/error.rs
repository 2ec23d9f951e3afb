use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid query")]
    InvalidQuery,

    #[error("Query too long (max 100 chars)")]
    QueryTooLong,

    #[error("Invalid menu data")]
    InvalidMenu,

    #[error("Model returned an empty reply")]
    EmptyModelReply,

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidQuery | AppError::QueryTooLong | AppError::InvalidMenu => {
                StatusCode::BAD_REQUEST
            }
            AppError::EmptyModelReply | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Internal detail stays in the logs, never in the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Smart search error: {self}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        Self::Internal(Box::new(value))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Internal(Box::new(value))
    }
}
