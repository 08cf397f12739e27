use metrics::{counter, describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

const QUERIES: [&str; 2] = ["summary", "positions"];

/// Install the Prometheus exporter as the global recorder and register all
/// application metrics. The returned handle renders the scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(handle)
}

/// A handle backed by a recorder that is not installed globally. Renders an
/// empty payload; used where a process-wide recorder already exists or is
/// unwanted (tests).
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

fn register_metrics() {
    describe_counter!("position_queries_total", "Position queries issued");
    describe_counter!(
        "position_query_failures_total",
        "Position queries that timed out or failed in the database"
    );
    describe_histogram!(
        "position_query_duration_seconds",
        Unit::Seconds,
        "Position query latency"
    );
    describe_counter!("http_bad_requests_total", "Requests rejected with 400");

    // Pre-register counters so they appear before the first request.
    for query in QUERIES {
        counter!("position_queries_total", "query" => query).absolute(0);
    }
    counter!("http_bad_requests_total").absolute(0);
}
