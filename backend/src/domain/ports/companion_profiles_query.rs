//! Driving port for public and owner profile reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{CompanionProfile, Error, ProfileId, PublicProfileSearch, UserId};

/// Profile reads for the public and for profile owners.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanionProfilesQuery: Send + Sync {
    /// Search approved, visible profiles.
    async fn search_profiles(
        &self,
        search: &PublicProfileSearch,
        page: PageRequest,
    ) -> Result<Page<CompanionProfile>, Error>;

    /// Fetch an approved, visible profile. Anything else is not found.
    async fn public_profile(&self, id: &ProfileId) -> Result<CompanionProfile, Error>;

    /// Fetch the caller's own profile regardless of review state.
    async fn own_profile(&self, owner: &UserId) -> Result<CompanionProfile, Error>;
}
