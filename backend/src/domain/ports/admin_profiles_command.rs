//! Driving port for admin profile mutations.

use async_trait::async_trait;

use crate::domain::{
    CompanionProfile, Error, ProfileEdit, ProfileId, ReviewDecision, ReviewedProfile, UserId,
};

/// Admin use-cases that change companion profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminProfilesCommand: Send + Sync {
    /// Approve or reject a profile on behalf of `admin`.
    async fn review_profile(
        &self,
        admin: &UserId,
        id: &ProfileId,
        decision: ReviewDecision,
    ) -> Result<ReviewedProfile, Error>;

    /// Apply a whitelisted edit and return the stored profile.
    async fn update_profile(
        &self,
        id: &ProfileId,
        edit: &ProfileEdit,
    ) -> Result<CompanionProfile, Error>;

    /// Delete a profile permanently.
    async fn delete_profile(&self, id: &ProfileId) -> Result<(), Error>;
}
