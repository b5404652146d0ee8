//! Port abstraction for companion profile persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::{
    AdminProfileListing, CompanionProfile, ProfileCounts, ProfileId, ProfileListFilter,
    ProfileReview, PublicProfileSearch, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by companion profile adapters.
    pub enum ProfilePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
        /// A write collided with a unique constraint, such as one profile per owner.
        Conflict { message: String } => "profile repository write conflicted: {message}",
    }
}

/// Storage for companion profiles.
///
/// Listing methods order results by creation time, newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanionProfileRepository: Send + Sync {
    /// Fetch a profile by identifier.
    async fn find_by_id(
        &self,
        id: &ProfileId,
    ) -> Result<Option<CompanionProfile>, ProfilePersistenceError>;

    /// Fetch the profile owned by `owner`.
    async fn find_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<CompanionProfile>, ProfilePersistenceError>;

    /// Fetch a profile together with its owner's contact details.
    async fn find_review(
        &self,
        id: &ProfileId,
    ) -> Result<Option<ProfileReview>, ProfilePersistenceError>;

    /// Admin listing with owner summaries.
    async fn list_for_admin(
        &self,
        filter: &ProfileListFilter,
        page: PageRequest,
    ) -> Result<Page<AdminProfileListing>, ProfilePersistenceError>;

    /// Public search over approved and visible profiles.
    async fn search_public(
        &self,
        search: &PublicProfileSearch,
        page: PageRequest,
    ) -> Result<Page<CompanionProfile>, ProfilePersistenceError>;

    /// Insert the profile or overwrite the stored row with the same id.
    async fn save(&self, profile: &CompanionProfile) -> Result<(), ProfilePersistenceError>;

    /// Delete a profile. Returns `false` when no row matched.
    async fn delete(&self, id: &ProfileId) -> Result<bool, ProfilePersistenceError>;

    /// Count profiles by review status; `recently_created` counts profiles
    /// created at or after `since`.
    async fn counts(&self, since: DateTime<Utc>) -> Result<ProfileCounts, ProfilePersistenceError>;
}
