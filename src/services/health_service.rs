use crate::adapters::database::DbPool;
use opentelemetry::{global, metrics::Gauge};
use std::time::Duration;
use tokio::time::timeout;

const CHECK_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) status: Gauge<i64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("munigate");
        Self {
            status: meter
                .i64_gauge("munigate_health_status")
                .with_description("Status of health checks (1 for ok, 0 for error)")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthService {
    pool: DbPool,
    metrics: Metrics,
}

impl HealthService {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool, metrics: Metrics::new() }
    }

    /// Pings the database with a bounded timeout.
    ///
    /// # Errors
    /// Returns an error if the query fails or does not complete in time.
    pub async fn check_db(&self) -> anyhow::Result<()> {
        let result = timeout(CHECK_TIMEOUT, sqlx::query("SELECT 1").execute(&self.pool)).await;

        match result {
            Ok(Ok(_)) => {
                self.metrics.status.record(1, &[]);
                Ok(())
            }
            Ok(Err(e)) => {
                self.metrics.status.record(0, &[]);
                Err(e.into())
            }
            Err(_) => {
                self.metrics.status.record(0, &[]);
                Err(anyhow::anyhow!("database health check timed out"))
            }
        }
    }
}
