//! Driving port for admin profile reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{AdminProfileListing, Error, ProfileId, ProfileListFilter, ProfileReview};

/// Admin use-cases that read companion profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminProfilesQuery: Send + Sync {
    /// Paginated listing filtered by review status and free text.
    async fn list_profiles(
        &self,
        filter: &ProfileListFilter,
        page: PageRequest,
    ) -> Result<Page<AdminProfileListing>, Error>;

    /// Profile plus owner contact details for review.
    async fn profile_for_review(&self, id: &ProfileId) -> Result<ProfileReview, Error>;
}
