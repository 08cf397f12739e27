use std::future::Future;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use sqlx::SqlitePool;

use crate::db::position_repo;
use crate::models::{OrderField, Position, UnknownOrderField};

/// Upper bound for a single database round trip.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct QueryConfig {
    pub timeout: Duration,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout: QUERY_TIMEOUT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueryFailure {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl QueryFailure {
    fn reason(&self) -> &'static str {
        match self {
            QueryFailure::Timeout(_) => "timeout",
            QueryFailure::Database(_) => "database",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    UnknownOrderField(#[from] UnknownOrderField),

    #[error("Invalid paging: limit={limit} offset={offset}")]
    InvalidPaging { limit: i64, offset: i64 },

    #[error("Query failed: {0}")]
    QueryFailed(#[from] QueryFailure),
}

/// Read-only queries over the `positions` table.
///
/// Cloning is cheap; clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct PositionService {
    pool: SqlitePool,
    config: QueryConfig,
}

impl PositionService {
    pub fn new(pool: SqlitePool, config: QueryConfig) -> Self {
        Self { pool, config }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Sum of all position values for `domain`.
    ///
    /// A domain without rows and a domain whose positions sum to zero both
    /// report 0; callers cannot tell the two apart.
    pub async fn summary(&self, domain: &str) -> Result<i64, QueryError> {
        let sum = self
            .bounded("summary", position_repo::sum_positions(&self.pool, domain))
            .await?;

        Ok(sum.unwrap_or(0))
    }

    /// A page of `domain`'s positions, ascending by `order_by` (volume when
    /// empty). The field is checked against the allow-list before any SQL is
    /// built.
    pub async fn positions(
        &self,
        domain: &str,
        limit: i64,
        offset: i64,
        order_by: &str,
    ) -> Result<Vec<Position>, QueryError> {
        let order = OrderField::parse(order_by)?;
        if limit < 0 || offset < 0 {
            return Err(QueryError::InvalidPaging { limit, offset });
        }

        tracing::debug!(domain, %order, limit, offset, "Fetching positions");

        let positions = self
            .bounded(
                "positions",
                position_repo::list_positions(&self.pool, domain, order, limit, offset),
            )
            .await?;

        Ok(positions)
    }

    /// Run `fut` under the query timeout. On expiry the future is dropped,
    /// which hands its connection back to the pool.
    async fn bounded<T, F>(&self, query: &'static str, fut: F) -> Result<T, QueryFailure>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        counter!("position_queries_total", "query" => query).increment(1);
        let started = Instant::now();

        let result = match tokio::time::timeout(self.config.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(QueryFailure::Database(e)),
            Err(_) => Err(QueryFailure::Timeout(self.config.timeout)),
        };

        histogram!("position_query_duration_seconds", "query" => query)
            .record(started.elapsed().as_secs_f64());

        if let Err(e) = &result {
            counter!(
                "position_query_failures_total",
                "query" => query,
                "reason" => e.reason()
            )
            .increment(1);
            tracing::warn!(query, error = %e, "Position query failed");
        }

        result
    }
}
