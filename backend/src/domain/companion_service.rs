//! Public and owner-facing companion profile service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::info;

use crate::domain::admin_service::{PROFILE_NOT_FOUND_MESSAGE, map_profile_error};
use crate::domain::ports::{
    CompanionProfileRepository, CompanionProfilesCommand, CompanionProfilesQuery,
};
use crate::domain::{
    CompanionProfile, Error, ProfileEdit, ProfileId, ProfileValidationError, PublicProfileSearch,
    UserId,
};

/// Service behind the `/companions` endpoints.
#[derive(Clone)]
pub struct CompanionProfileService<P> {
    profiles: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> CompanionProfileService<P> {
    /// Create a new service over the profile repository.
    pub fn new(profiles: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { profiles, clock }
    }
}

#[async_trait]
impl<P> CompanionProfilesQuery for CompanionProfileService<P>
where
    P: CompanionProfileRepository,
{
    async fn search_profiles(
        &self,
        search: &PublicProfileSearch,
        page: PageRequest,
    ) -> Result<Page<CompanionProfile>, Error> {
        self.profiles
            .search_public(search, page)
            .await
            .map_err(map_profile_error)
    }

    async fn public_profile(&self, id: &ProfileId) -> Result<CompanionProfile, Error> {
        self.profiles
            .find_by_id(id)
            .await
            .map_err(map_profile_error)?
            .filter(CompanionProfile::is_public)
            .ok_or_else(|| Error::not_found(PROFILE_NOT_FOUND_MESSAGE))
    }

    async fn own_profile(&self, owner: &UserId) -> Result<CompanionProfile, Error> {
        self.profiles
            .find_by_owner(owner)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found(PROFILE_NOT_FOUND_MESSAGE))
    }
}

#[async_trait]
impl<P> CompanionProfilesCommand for CompanionProfileService<P>
where
    P: CompanionProfileRepository,
{
    async fn upsert_own_profile(
        &self,
        owner: &UserId,
        edit: &ProfileEdit,
    ) -> Result<(CompanionProfile, bool), Error> {
        let now = self.clock.utc();
        let existing = self
            .profiles
            .find_by_owner(owner)
            .await
            .map_err(map_profile_error)?;

        let (mut profile, created) = match existing {
            Some(profile) => (profile, false),
            None => {
                let Some(name) = edit.display_name.as_deref() else {
                    return Err(Error::from(ProfileValidationError::single(
                        "displayName is required",
                    )));
                };
                (
                    CompanionProfile::draft(owner.clone(), name.trim().to_owned(), now),
                    true,
                )
            }
        };

        profile.apply_edit(edit, now)?;
        self.profiles
            .save(&profile)
            .await
            .map_err(map_profile_error)?;
        info!(
            profile_id = %profile.id,
            owner_id = %owner,
            created,
            "companion profile saved by owner"
        );
        Ok((profile, created))
    }
}
