use std::future::IntoFuture;

use tokio::sync::watch;

use sem_positions::api::router::create_router;
use sem_positions::config::{AppConfig, LogFormat};
use sem_positions::services::positions::{PositionService, QueryConfig};
use sem_positions::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(&config);
    let metrics_handle = metrics::init_metrics()?;

    tracing::info!(driver = %config.db_driver, path = %config.db_path, "Connecting to database...");
    let db = db::init_pool(&config).await?;
    tracing::info!("Database connected");

    let addr = config.bind_addr();
    let grace = config.shutdown_grace();

    let state = AppState {
        positions: PositionService::new(db.clone(), QueryConfig::default()),
        db: db.clone(),
        config,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server started at http://{addr}/");

    // Flipped once a shutdown signal arrives; starts the grace period clock.
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = stop_tx.send(true);
        })
        .into_future();

    tokio::select! {
        result = server => result?,
        _ = async {
            let _ = stop_rx.wait_for(|stopped| *stopped).await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_secs = grace.as_secs(), "In-flight requests did not finish in time; forcing shutdown");
        }
    }

    db.close().await;
    tracing::info!("Server stopped.");

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(config.level_filter().into()));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
