//! Tests for the application bootstrap: server construction and readiness
//! signalling.

use super::server::{ServerConfig, create_server};
use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use companion_backend::inbound::http::health::HealthState;
use companion_backend::outbound::persistence::{DbPool, PoolConfig};
use rstest::{fixture, rstest};
use std::net::SocketAddr;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

/// Pool pointing at a closed port; bb8 only connects on checkout.
async fn lazy_pool() -> DbPool {
    DbPool::new(PoolConfig::new("postgres://companion@127.0.0.1:1/companions"))
        .await
        .expect("pool builds without connecting")
}

async fn server_config(bind_address: SocketAddr) -> ServerConfig {
    let config = ServerConfig::new(
        Key::generate(),
        false,
        SameSite::Lax,
        bind_address,
        lazy_pool().await,
    );
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(
        actix_web_prom::PrometheusMetricsBuilder::new("test")
            .endpoint("/metrics")
            .build()
            .expect("metrics should build for tests"),
    );
    config
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(
    health_state: web::Data<HealthState>,
    bind_address: SocketAddr,
) {
    assert!(!health_state.is_ready(), "state should start unready");

    let server = create_server(health_state.clone(), server_config(bind_address).await)
        .expect("server should bind to an ephemeral port");

    assert!(health_state.is_ready(), "server creation marks readiness");
    server.handle().stop(false).await;
}

#[rstest]
#[actix_rt::test]
async fn create_server_reports_bind_failures(health_state: web::Data<HealthState>) {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").expect("reserve a port");
    let addr = occupied.local_addr().expect("local addr");

    let result = create_server(health_state.clone(), server_config(addr).await);

    assert!(result.is_err(), "binding an occupied port should fail");
    assert!(!health_state.is_ready(), "failed servers never report ready");
}
