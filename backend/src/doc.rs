//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the schemas
//! they reference, and the session cookie security scheme. Swagger UI serves
//! it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AdminProfileListing, AdminUserListing, CompanionProfile, DashboardStats, Error, ErrorCode,
    ProfileCounts, ProfileOwner, ProfileReview, ProfileStatus, ProfileSummary, ReviewOwner,
    ReviewedProfile, User, UserCounts, UserType,
};
use crate::inbound::http::admin::ReviewRequest;
use crate::inbound::http::auth::{LoginRequest, LoginResponse};
use crate::inbound::http::schemas::{
    AdminProfilePage, MessageResponse, ProfileEditRequest, ProfileResponse, PublicProfile,
    PublicProfilePage, ReviewResponse, UserPage,
};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Companion marketplace API",
        description = "Admin moderation, public profile browsing, and companion self-service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::admin::dashboard_stats,
        crate::inbound::http::admin::list_profiles,
        crate::inbound::http::admin::get_profile,
        crate::inbound::http::admin::review_profile,
        crate::inbound::http::admin::update_profile,
        crate::inbound::http::admin::delete_profile,
        crate::inbound::http::admin::list_users,
        crate::inbound::http::companions::search_profiles,
        crate::inbound::http::companions::get_own_profile,
        crate::inbound::http::companions::upsert_own_profile,
        crate::inbound::http::companions::get_public_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        UserType,
        CompanionProfile,
        ProfileStatus,
        ProfileOwner,
        ReviewOwner,
        ProfileSummary,
        ProfileReview,
        ReviewedProfile,
        AdminProfileListing,
        AdminUserListing,
        DashboardStats,
        ProfileCounts,
        UserCounts,
        LoginRequest,
        LoginResponse,
        ReviewRequest,
        ProfileEditRequest,
        MessageResponse,
        ReviewResponse,
        ProfileResponse,
        AdminProfilePage,
        PublicProfile,
        PublicProfilePage,
        UserPage,
    )),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "admin", description = "Profile moderation and reporting, Admin role only"),
        (name = "companions", description = "Public browsing and owner self-service"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
