//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: define the companion marketplace model (users, companion
//! profiles, dashboard counters) and the use-cases the HTTP adapter drives.
//! Nothing here depends on actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserId, UserType: account read model.
//! - CompanionProfile and friends: the reviewed aggregate.
//! - AdminService / CompanionProfileService: driving port implementations.

pub mod admin_service;
pub mod auth;
pub mod companion_profile;
pub mod companion_service;
pub mod dashboard;
pub mod error;
pub mod ports;
pub mod search_term;
pub mod trace_id;
pub mod user;

pub use self::admin_service::{AdminService, PROFILE_NOT_FOUND_MESSAGE};
pub use self::auth::{AuthenticatedUser, LoginCredentials, LoginValidationError};
pub use self::companion_profile::{
    AdminProfileListing, CompanionProfile, DEFAULT_REJECTION_REASON, LONG_FIELD_MAX,
    PENDING_COMPLETENESS_THRESHOLD, ProfileEdit, ProfileId, ProfileListFilter, ProfileOwner,
    ProfileReview, ProfileStatus, ProfileSummary, ProfileValidationError, PublicProfileSearch,
    ReviewDecision, ReviewOwner, ReviewedProfile, SHORT_FIELD_MAX,
};
pub use self::companion_service::CompanionProfileService;
pub use self::dashboard::{
    DashboardStats, ProfileCounts, RECENT_WINDOW_DAYS, UserCounts, recent_cutoff,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::search_term::SearchTerm;
pub use self::trace_id::TraceId;
pub use self::user::{AdminUserListing, User, UserId, UserListFilter, UserType, UserValidationError};
