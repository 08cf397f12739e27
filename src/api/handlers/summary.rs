use axum::extract::State;
use axum::response::Response;
use axum::Extension;
use serde::Serialize;

use crate::api::domain::Domain;
use crate::api::json_response;
use crate::errors::AppError;
use crate::AppState;

#[derive(Serialize)]
pub struct SummaryResponse {
    pub domain: String,
    pub positions_count: i64,
}

pub async fn summary(
    State(state): State<AppState>,
    Extension(Domain(domain)): Extension<Domain>,
) -> Result<Response, AppError> {
    let positions_count = state.positions.summary(&domain).await?;

    json_response(&SummaryResponse {
        domain,
        positions_count,
    })
}
