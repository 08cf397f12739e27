use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics::counter;
use serde::Serialize;

use crate::models::UnknownOrderField;
use crate::services::positions::QueryError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => {
                counter!("http_bad_requests_total").increment(1);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Serialization(e) => {
                tracing::error!("Failed to encode response: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

impl From<UnknownOrderField> for AppError {
    fn from(e: UnknownOrderField) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::UnknownOrderField(e) => e.into(),
            e @ QueryError::InvalidPaging { .. } => AppError::BadRequest(e.to_string()),
            e @ QueryError::QueryFailed(_) => AppError::Internal(e.into()),
        }
    }
}
