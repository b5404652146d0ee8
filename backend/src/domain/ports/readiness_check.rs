//! Driven port reporting whether backing services accept work.

use async_trait::async_trait;

use crate::domain::Error;

/// Dependency check consulted by the readiness endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    /// Succeeds when every dependency answers.
    async fn check(&self) -> Result<(), Error>;
}
