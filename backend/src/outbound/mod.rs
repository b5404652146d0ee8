//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories and the login service,
//!   using Diesel ORM.
//!
//! Adapters translate between domain types and rows. They contain no
//! business rules.

pub mod persistence;
