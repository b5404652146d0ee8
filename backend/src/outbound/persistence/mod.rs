//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. Status rules and validation stay in the
//!   domain.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are never exposed to the domain layer.
//! - **Async-safe pooling**: Connections are managed via `bb8` pools with
//!   proper async integration through `diesel-async`.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types; SQL details are logged, not returned.
//!
//! # Example
//!
//! ```ignore
//! use companion_backend::outbound::persistence::{
//!     DbPool, DieselCompanionProfileRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/companions")).await?;
//! let profiles = DieselCompanionProfileRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_companion_profile_repository;
mod diesel_login_service;
mod diesel_readiness_check;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_companion_profile_repository::DieselCompanionProfileRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_readiness_check::DieselReadinessCheck;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
