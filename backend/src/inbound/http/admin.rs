//! Admin moderation and reporting endpoints.
//!
//! ```text
//! GET    /api/v1/admin/stats
//! GET    /api/v1/admin/companions?page=1&limit=20&status=pending&search=luna
//! GET    /api/v1/admin/companions/{id}
//! PUT    /api/v1/admin/companions/{id}/approval {"approved":false,"rejectionReason":"..."}
//! PUT    /api/v1/admin/companions/{id} {"displayName":"Luna"}
//! DELETE /api/v1/admin/companions/{id}
//! GET    /api/v1/admin/users?userType=Companion&search=ada
//! ```
//!
//! Every route sits behind [`RequireRole::admin`], which rejects callers
//! before the body or query is extracted.

use actix_web::{delete, get, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    DashboardStats, Error, ProfileEdit, ProfileListFilter, ProfileReview, ReviewDecision,
    UserListFilter, UserType,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    AdminProfilePage, MessageResponse, ProfileEditRequest, ProfileResponse, ReviewResponse,
    UserPage,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_page_request, parse_profile_id};
use crate::middleware::RequireRole;

const APPROVED_MESSAGE: &str = "Profile approved successfully.";
const REJECTED_MESSAGE: &str = "Profile rejected.";
const UPDATED_MESSAGE: &str = "Profile updated successfully by admin.";
const DELETED_MESSAGE: &str = "Profile deleted successfully.";

/// Mount the admin scope on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(RequireRole::admin())
            .service(dashboard_stats)
            .service(list_profiles)
            .service(review_profile)
            .service(get_profile)
            .service(update_profile)
            .service(delete_profile)
            .service(list_users),
    );
}

/// Query string for the admin profile listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileListQuery {
    page: Option<String>,
    limit: Option<String>,
    status: Option<String>,
    search: Option<String>,
}

/// Query string for the admin user listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    page: Option<String>,
    limit: Option<String>,
    user_type: Option<String>,
    search: Option<String>,
}

/// Approve or reject a profile.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// Missing counts as `false`, which rejects the profile.
    #[serde(default)]
    pub approved: bool,
    /// Used only when rejecting. Blank or missing records a default reason.
    #[schema(example = "Photos do not meet guidelines.")]
    pub rejection_reason: Option<String>,
}

impl From<ReviewRequest> for ReviewDecision {
    fn from(value: ReviewRequest) -> Self {
        if value.approved {
            Self::Approve
        } else {
            Self::Reject {
                reason: value.rejection_reason,
            }
        }
    }
}

/// Dashboard counters.
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    responses(
        (status = 200, description = "Profile and user counters", body = DashboardStats),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminDashboardStats",
    security(("SessionCookie" = []))
)]
#[get("/stats")]
pub async fn dashboard_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<DashboardStats>> {
    let stats = state.admin.stats.dashboard_stats().await?;
    Ok(web::Json(stats))
}

/// Paginated profile listing, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/companions",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 20, max 100"),
        ("status" = Option<String>, Query, description = "pending, approved or rejected; other values are ignored"),
        ("search" = Option<String>, Query, description = "Partial match on display name, owner name or city")
    ),
    responses(
        (status = 200, description = "Profiles", body = AdminProfilePage),
        (status = 400, description = "Invalid pagination", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListProfiles",
    security(("SessionCookie" = []))
)]
#[get("/companions")]
pub async fn list_profiles(
    state: web::Data<HttpState>,
    query: web::Query<ProfileListQuery>,
) -> ApiResult<web::Json<AdminProfilePage>> {
    let query = query.into_inner();
    let page = parse_page_request(query.page.as_deref(), query.limit.as_deref())?;
    let filter = ProfileListFilter::from_query(query.status.as_deref(), query.search.as_deref());
    let profiles = state.admin.profiles.list_profiles(&filter, page).await?;
    Ok(web::Json(profiles.into()))
}

/// Profile with owner contact details, for review.
#[utoipa::path(
    get,
    path = "/api/v1/admin/companions/{id}",
    params(("id" = String, Path, description = "Profile UUID")),
    responses(
        (status = 200, description = "Profile under review", body = ProfileReview),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 404, description = "Companion profile not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminGetProfile",
    security(("SessionCookie" = []))
)]
#[get("/companions/{id}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileReview>> {
    let id = parse_profile_id(&path)?;
    let review = state.admin.profiles.profile_for_review(&id).await?;
    Ok(web::Json(review))
}

/// Approve or reject a profile.
#[utoipa::path(
    put,
    path = "/api/v1/admin/companions/{id}/approval",
    params(("id" = String, Path, description = "Profile UUID")),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Decision recorded", body = ReviewResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 404, description = "Companion profile not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminReviewProfile",
    security(("SessionCookie" = []))
)]
#[put("/companions/{id}/approval")]
pub async fn review_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReviewRequest>,
) -> ApiResult<web::Json<ReviewResponse>> {
    let admin = session.require_role(UserType::Admin)?;
    let id = parse_profile_id(&path)?;
    let decision = ReviewDecision::from(payload.into_inner());
    let message = match decision {
        ReviewDecision::Approve => APPROVED_MESSAGE,
        ReviewDecision::Reject { .. } => REJECTED_MESSAGE,
    };
    let profile = state
        .admin
        .profiles_command
        .review_profile(&admin.id, &id, decision)
        .await?;
    Ok(web::Json(ReviewResponse {
        message: message.to_owned(),
        profile,
    }))
}

/// Apply a whitelisted field update.
#[utoipa::path(
    put,
    path = "/api/v1/admin/companions/{id}",
    params(("id" = String, Path, description = "Profile UUID")),
    request_body = ProfileEditRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Validation Error", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 404, description = "Companion profile not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateProfile",
    security(("SessionCookie" = []))
)]
#[put("/companions/{id}")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ProfileEditRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let id = parse_profile_id(&path)?;
    let edit = ProfileEdit::from(payload.into_inner());
    let profile = state.admin.profiles_command.update_profile(&id, &edit).await?;
    Ok(web::Json(ProfileResponse {
        message: UPDATED_MESSAGE.to_owned(),
        profile,
    }))
}

/// Delete a profile permanently.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/companions/{id}",
    params(("id" = String, Path, description = "Profile UUID")),
    responses(
        (status = 200, description = "Profile deleted", body = MessageResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 404, description = "Companion profile not found", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteProfile",
    security(("SessionCookie" = []))
)]
#[delete("/companions/{id}")]
pub async fn delete_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_profile_id(&path)?;
    state.admin.profiles_command.delete_profile(&id).await?;
    info!(profile_id = %id, "profile deleted via admin api");
    Ok(web::Json(MessageResponse {
        message: DELETED_MESSAGE.to_owned(),
    }))
}

/// Paginated user listing without credential material.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 20, max 100"),
        ("userType" = Option<String>, Query, description = "Client, Companion or Admin; other values are ignored"),
        ("search" = Option<String>, Query, description = "Partial match on name or email")
    ),
    responses(
        (status = 200, description = "Users", body = UserPage),
        (status = 400, description = "Invalid pagination", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListUsers",
    security(("SessionCookie" = []))
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<UserListQuery>,
) -> ApiResult<web::Json<UserPage>> {
    let query = query.into_inner();
    let page = parse_page_request(query.page.as_deref(), query.limit.as_deref())?;
    let filter = UserListFilter::from_query(query.user_type.as_deref(), query.search.as_deref());
    let users = state.admin.users.list_users(&filter, page).await?;
    Ok(web::Json(users.into()))
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
