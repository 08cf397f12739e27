use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::services::positions::QUERY_TIMEOUT;
use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let ping = sqlx::query("SELECT 1").execute(&state.db);
    let db_ok = matches!(tokio::time::timeout(QUERY_TIMEOUT, ping).await, Ok(Ok(_)));

    if db_ok {
        (StatusCode::OK, Json(json!({ "status": "healthy" })))
    } else {
        tracing::warn!("Health check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unhealthy", "db": "disconnected" })),
        )
    }
}
