//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminProfilesCommand, AdminProfilesQuery, AdminUsersQuery, CompanionProfilesCommand,
    CompanionProfilesQuery, DashboardStatsQuery, LoginService,
};

/// Port implementations backing the admin endpoints.
#[derive(Clone)]
pub struct AdminPorts {
    pub profiles: Arc<dyn AdminProfilesQuery>,
    pub profiles_command: Arc<dyn AdminProfilesCommand>,
    pub users: Arc<dyn AdminUsersQuery>,
    pub stats: Arc<dyn DashboardStatsQuery>,
}

/// Port implementations backing the public and owner endpoints.
#[derive(Clone)]
pub struct CompanionPorts {
    pub profiles: Arc<dyn CompanionProfilesQuery>,
    pub profiles_command: Arc<dyn CompanionProfilesCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub admin: AdminPorts,
    pub companions: CompanionPorts,
}

impl HttpState {
    /// Bundle the login port with the admin and companion port groups.
    pub fn new(login: Arc<dyn LoginService>, admin: AdminPorts, companions: CompanionPorts) -> Self {
        Self {
            login,
            admin,
            companions,
        }
    }
}
