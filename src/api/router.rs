use std::time::Duration;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::domain::require_domain;
use super::handlers;

/// Upper bound for a whole request, including reading and writing.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

pub fn create_router(state: AppState) -> Router {
    // Operational routes: no domain required
    let mut public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    if state.config.debug_mode {
        tracing::info!("Debug mode: mounting /debug routes");
        public = public
            .route("/debug/pool", get(handlers::debug::pool))
            .route("/debug/config", get(handlers::debug::config));
    }

    // Position API: every route is scoped to a domain
    let api = Router::new()
        .route("/api/summary", get(handlers::summary::summary))
        .route("/api/positions", get(handlers::positions::list))
        .route_layer(middleware::from_fn(require_domain));

    public.merge(api).with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
    )
}
