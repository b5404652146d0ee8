//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test as actix_test;
use chrono::{TimeZone, Utc};

use crate::domain::ports::{
    MockAdminProfilesCommand, MockAdminProfilesQuery, MockAdminUsersQuery,
    MockCompanionProfilesCommand, MockCompanionProfilesQuery, MockDashboardStatsQuery,
    MockLoginService,
};
use crate::domain::{AuthenticatedUser, CompanionProfile, UserId, UserType};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::state::{AdminPorts, CompanionPorts, HttpState};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the `session` cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Mock ports with no expectations; any unexpected call panics.
#[derive(Default)]
pub struct TestPorts {
    pub login: MockLoginService,
    pub admin_profiles: MockAdminProfilesQuery,
    pub admin_profiles_command: MockAdminProfilesCommand,
    pub admin_users: MockAdminUsersQuery,
    pub stats: MockDashboardStatsQuery,
    pub companion_profiles: MockCompanionProfilesQuery,
    pub companion_profiles_command: MockCompanionProfilesCommand,
}

impl TestPorts {
    /// Ports whose login accepts any credentials as a fresh user of `role`.
    pub fn logged_in_as(role: UserType) -> (Self, UserId) {
        let id = UserId::random();
        let user = AuthenticatedUser {
            id: id.clone(),
            user_type: role,
        };
        let mut ports = Self::default();
        ports
            .login
            .expect_authenticate()
            .returning(move |_| Ok(user.clone()));
        (ports, id)
    }

    /// Wrap the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.login),
            AdminPorts {
                profiles: Arc::new(self.admin_profiles),
                profiles_command: Arc::new(self.admin_profiles_command),
                users: Arc::new(self.admin_users),
                stats: Arc::new(self.stats),
            },
            CompanionPorts {
                profiles: Arc::new(self.companion_profiles),
                profiles_command: Arc::new(self.companion_profiles_command),
            },
        )
    }
}

/// Log in through `POST /api/v1/login` and return the session cookie.
pub async fn login_and_get_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            email: "someone@example.com".to_owned(),
            password: "password".to_owned(),
        })
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "login should succeed");
    session_cookie(&response)
}

/// Unreviewed profile owned by `owner`, created at a fixed instant.
pub fn sample_profile(owner: UserId) -> CompanionProfile {
    let created = Utc
        .with_ymd_and_hms(2025, 5, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    CompanionProfile::draft(owner, "Luna".to_owned(), created)
}
