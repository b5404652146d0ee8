//! Driving port for the admin dashboard counters.

use async_trait::async_trait;

use crate::domain::{DashboardStats, Error};

/// Admin use-case computing dashboard counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardStatsQuery: Send + Sync {
    /// Counters as of now.
    async fn dashboard_stats(&self) -> Result<DashboardStats, Error>;
}
