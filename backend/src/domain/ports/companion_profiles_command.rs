//! Driving port for owner profile edits.

use async_trait::async_trait;

use crate::domain::{CompanionProfile, Error, ProfileEdit, UserId};

/// Owner-side profile mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanionProfilesCommand: Send + Sync {
    /// Create the caller's profile if absent, then apply `edit`.
    ///
    /// Returns the stored profile and whether it was newly created.
    async fn upsert_own_profile(
        &self,
        owner: &UserId,
        edit: &ProfileEdit,
    ) -> Result<(CompanionProfile, bool), Error>;
}
