//! Database readiness check backing `GET /health/ready`.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::ReadinessCheck;

use super::pool::DbPool;

/// Runs `SELECT 1` on a pooled connection.
#[derive(Clone)]
pub struct DieselReadinessCheck {
    pool: DbPool,
}

impl DieselReadinessCheck {
    /// Create a readiness check over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadinessCheck for DieselReadinessCheck {
    async fn check(&self) -> Result<(), Error> {
        let mut conn = self.pool.get().await.map_err(|err| {
            warn!(error = %err, "readiness check could not check out a connection");
            Error::service_unavailable("database unavailable")
        })?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                warn!(error = %err, "readiness check query failed");
                Error::service_unavailable("database unavailable")
            })
    }
}
