//! Public profile browsing and owner self-service endpoints.
//!
//! ```text
//! GET /api/v1/companions/search?q=art&city=lisbon&page=1&limit=20
//! GET /api/v1/companions/me
//! PUT /api/v1/companions/me {"displayName":"Luna","locationCity":"Lisbon"}
//! GET /api/v1/companions/{id}
//! ```

use actix_web::{HttpResponse, get, put, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::{
    CompanionProfile, Error, ProfileEdit, PublicProfileSearch, SearchTerm, UserType,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ProfileEditRequest, ProfileResponse, PublicProfile, PublicProfilePage,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_page_request, parse_profile_id};
use crate::middleware::RequireRole;

const CREATED_MESSAGE: &str = "Profile created successfully.";
const UPDATED_MESSAGE: &str = "Profile updated successfully.";

/// Mount the companion routes on `cfg`.
///
/// `/companions/me` is registered ahead of `/companions/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search_profiles)
        .service(
            web::scope("/companions/me")
                .wrap(RequireRole::companion())
                .service(get_own_profile)
                .service(upsert_own_profile),
        )
        .service(get_public_profile);
}

/// Query string for the public search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    city: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

/// Search approved, visible profiles.
#[utoipa::path(
    get,
    path = "/api/v1/companions/search",
    params(
        ("q" = Option<String>, Query, description = "Partial match on display name, city or about text"),
        ("city" = Option<String>, Query, description = "Partial match on city"),
        ("page" = Option<u32>, Query, description = "One-based page number, default 1"),
        ("limit" = Option<u32>, Query, description = "Page size, default 20, max 100")
    ),
    responses(
        (status = 200, description = "Matching profiles", body = PublicProfilePage),
        (status = 400, description = "Invalid pagination", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["companions"],
    operation_id = "searchProfiles",
    security([])
)]
#[get("/companions/search")]
pub async fn search_profiles(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<PublicProfilePage>> {
    let query = query.into_inner();
    let page = parse_page_request(query.page.as_deref(), query.limit.as_deref())?;
    let search = PublicProfileSearch {
        query: query.q.as_deref().and_then(SearchTerm::new),
        city: query.city.as_deref().and_then(SearchTerm::new),
    };
    let profiles = state.companions.profiles.search_profiles(&search, page).await?;
    Ok(web::Json(profiles.into()))
}

/// The caller's own profile.
#[utoipa::path(
    get,
    path = "/api/v1/companions/me",
    responses(
        (status = 200, description = "Own profile", body = CompanionProfile),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Companion role required", body = Error),
        (status = 404, description = "No profile yet", body = Error)
    ),
    tags = ["companions"],
    operation_id = "getOwnProfile",
    security(("SessionCookie" = []))
)]
#[get("")]
pub async fn get_own_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CompanionProfile>> {
    let user = session.require_role(UserType::Companion)?;
    let profile = state.companions.profiles.own_profile(&user.id).await?;
    Ok(web::Json(profile))
}

/// Create or edit the caller's own profile.
///
/// Approval fields are never changed here.
#[utoipa::path(
    put,
    path = "/api/v1/companions/me",
    request_body = ProfileEditRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Validation Error", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Companion role required", body = Error)
    ),
    tags = ["companions"],
    operation_id = "upsertOwnProfile",
    security(("SessionCookie" = []))
)]
#[put("")]
pub async fn upsert_own_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileEditRequest>,
) -> ApiResult<HttpResponse> {
    let user = session.require_role(UserType::Companion)?;
    let edit = ProfileEdit::from(payload.into_inner());
    let (profile, created) = state
        .companions
        .profiles_command
        .upsert_own_profile(&user.id, &edit)
        .await?;
    info!(profile_id = %profile.id, user_id = %user.id, created, "own profile saved");
    let (mut builder, message) = if created {
        (HttpResponse::Created(), CREATED_MESSAGE)
    } else {
        (HttpResponse::Ok(), UPDATED_MESSAGE)
    };
    Ok(builder.json(ProfileResponse {
        message: message.to_owned(),
        profile,
    }))
}

/// A single approved, visible profile.
#[utoipa::path(
    get,
    path = "/api/v1/companions/{id}",
    params(("id" = String, Path, description = "Profile UUID")),
    responses(
        (status = 200, description = "Profile", body = PublicProfile),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "Companion profile not found", body = Error)
    ),
    tags = ["companions"],
    operation_id = "getPublicProfile",
    security([])
)]
#[get("/companions/{id}")]
pub async fn get_public_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PublicProfile>> {
    let id = parse_profile_id(&path)?;
    let profile = state.companions.profiles.public_profile(&id).await?;
    Ok(web::Json(profile.into()))
}
