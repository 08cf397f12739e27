use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::config::AppConfig;
use crate::AppState;

#[derive(Serialize)]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
    pub closed: bool,
}

pub async fn pool(State(state): State<AppState>) -> Json<PoolStats> {
    Json(PoolStats {
        size: state.db.size(),
        idle: state.db.num_idle(),
        closed: state.db.is_closed(),
    })
}

pub async fn config(State(state): State<AppState>) -> Json<AppConfig> {
    Json(state.config)
}
