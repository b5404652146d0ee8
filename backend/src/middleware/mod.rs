//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and role-based authorization.

pub mod authorization;
pub mod trace;

pub use authorization::RequireRole;
pub use trace::Trace;
