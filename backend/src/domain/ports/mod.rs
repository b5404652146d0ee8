//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`, [`LoginService`]) are called by
//! inbound adapters. Driven ports (`*Repository`) are implemented by outbound
//! adapters and consumed by the domain services.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_profiles_command;
mod admin_profiles_query;
mod admin_users_query;
mod companion_profile_repository;
mod companion_profiles_command;
mod companion_profiles_query;
mod dashboard_stats_query;
mod login_service;
mod readiness_check;
mod user_repository;

pub use admin_profiles_command::AdminProfilesCommand;
#[cfg(test)]
pub use admin_profiles_command::MockAdminProfilesCommand;
pub use admin_profiles_query::AdminProfilesQuery;
#[cfg(test)]
pub use admin_profiles_query::MockAdminProfilesQuery;
pub use admin_users_query::AdminUsersQuery;
#[cfg(test)]
pub use admin_users_query::MockAdminUsersQuery;
#[cfg(test)]
pub use companion_profile_repository::MockCompanionProfileRepository;
pub use companion_profile_repository::{CompanionProfileRepository, ProfilePersistenceError};
pub use companion_profiles_command::CompanionProfilesCommand;
#[cfg(test)]
pub use companion_profiles_command::MockCompanionProfilesCommand;
pub use companion_profiles_query::CompanionProfilesQuery;
#[cfg(test)]
pub use companion_profiles_query::MockCompanionProfilesQuery;
pub use dashboard_stats_query::DashboardStatsQuery;
#[cfg(test)]
pub use dashboard_stats_query::MockDashboardStatsQuery;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use readiness_check::MockReadinessCheck;
pub use readiness_check::ReadinessCheck;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
