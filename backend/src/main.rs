//! Backend entry-point: loads settings, migrates the database, and serves the
//! REST API.

mod server;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use companion_backend::inbound::http::health::HealthState;
use companion_backend::outbound::persistence::{
    DbPool, DieselReadinessCheck, PoolConfig, run_pending_migrations,
};
use server::{BuildMode, ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load configuration")?;
    let key = settings
        .session_key(BuildMode::from_debug_assertions())
        .wrap_err("failed to prepare session key")?;
    let same_site = settings.same_site()?;
    let bind_addr = settings.bind_addr()?;

    if settings.run_migrations {
        let applied = run_pending_migrations(&settings.database_url)
            .await
            .wrap_err("failed to apply database migrations")?;
        info!(applied, "database schema up to date");
    }

    let mut pool_config = PoolConfig::new(settings.database_url.as_str());
    if let Some(max_size) = settings.pool_max_size {
        pool_config = pool_config.with_max_size(max_size);
    }
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;

    let health_state = web::Data::new(
        HealthState::new().with_readiness_check(Arc::new(DieselReadinessCheck::new(pool.clone()))),
    );
    let config = ServerConfig::new(key, settings.cookie_secure, same_site, bind_addr, pool);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(make_metrics()?);

    create_server(health_state, config)
        .wrap_err("failed to start http server")?
        .await
        .wrap_err("http server terminated with an error")
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("companion")
        .endpoint("/metrics")
        .build()
        .map_err(|err| color_eyre::eyre::eyre!("failed to configure Prometheus metrics: {err}"))
}
