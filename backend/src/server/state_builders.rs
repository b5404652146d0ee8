//! Wires Diesel adapters and domain services into the HTTP state.

use std::sync::Arc;

use mockable::Clock;

use companion_backend::domain::{AdminService, CompanionProfileService};
use companion_backend::inbound::http::state::{AdminPorts, CompanionPorts, HttpState};
use companion_backend::outbound::persistence::{
    DbPool, DieselCompanionProfileRepository, DieselLoginService, DieselUserRepository,
};

/// Build handler state backed by `pool`.
///
/// One [`AdminService`] serves all four admin ports and one
/// [`CompanionProfileService`] serves both companion ports.
pub(super) fn build_http_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    let profiles = Arc::new(DieselCompanionProfileRepository::new(pool.clone()));
    let users = Arc::new(DieselUserRepository::new(pool.clone()));

    let admin = Arc::new(AdminService::new(
        Arc::clone(&profiles),
        users,
        Arc::clone(&clock),
    ));
    let companions = Arc::new(CompanionProfileService::new(profiles, clock));

    HttpState::new(
        Arc::new(DieselLoginService::new(pool.clone())),
        AdminPorts {
            profiles: admin.clone(),
            profiles_command: admin.clone(),
            users: admin.clone(),
            stats: admin,
        },
        CompanionPorts {
            profiles: companions.clone(),
            profiles_command: companions,
        },
    )
}
