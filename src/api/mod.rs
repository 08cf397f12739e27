pub mod domain;
pub mod handlers;
pub mod router;

use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::errors::AppError;

/// Encode `value` as a 200 JSON response, surfacing encoder failures as
/// [`AppError::Serialization`] instead of axum's plain-text 500.
pub(crate) fn json_response<T: Serialize>(value: &T) -> Result<Response, AppError> {
    let body = serde_json::to_vec(value)?;
    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}
