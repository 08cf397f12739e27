pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod services;

use crate::config::AppConfig;
use crate::services::positions::PositionService;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub config: AppConfig,
    pub positions: PositionService,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
