//! Admin moderation service.
//!
//! Implements the admin driving ports on top of the profile and user
//! repositories. Every mutation is logged with the affected profile id.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::info;

use crate::domain::ports::{
    AdminProfilesCommand, AdminProfilesQuery, AdminUsersQuery, CompanionProfileRepository,
    DashboardStatsQuery, ProfilePersistenceError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AdminProfileListing, AdminUserListing, CompanionProfile, DashboardStats, Error, ProfileEdit,
    ProfileId, ProfileListFilter, ProfileReview, ReviewDecision, ReviewedProfile, UserId,
    UserListFilter, recent_cutoff,
};

/// Message returned whenever a profile id matches nothing.
pub const PROFILE_NOT_FOUND_MESSAGE: &str = "Companion profile not found";

pub(crate) fn map_profile_error(error: ProfilePersistenceError) -> Error {
    match error {
        ProfilePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        ProfilePersistenceError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
        ProfilePersistenceError::Conflict { message } => Error::conflict(format!(
            "Companion profile was changed concurrently; retry the request ({message})"
        )),
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Admin service implementing the moderation and reporting ports.
#[derive(Clone)]
pub struct AdminService<P, U> {
    profiles: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, U> AdminService<P, U> {
    /// Create a new service over the profile and user repositories.
    pub fn new(profiles: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            profiles,
            users,
            clock,
        }
    }
}

impl<P, U> AdminService<P, U>
where
    P: CompanionProfileRepository,
{
    async fn load_profile(&self, id: &ProfileId) -> Result<CompanionProfile, Error> {
        self.profiles
            .find_by_id(id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found(PROFILE_NOT_FOUND_MESSAGE))
    }
}

#[async_trait]
impl<P, U> AdminProfilesQuery for AdminService<P, U>
where
    P: CompanionProfileRepository,
    U: UserRepository,
{
    async fn list_profiles(
        &self,
        filter: &ProfileListFilter,
        page: PageRequest,
    ) -> Result<Page<AdminProfileListing>, Error> {
        self.profiles
            .list_for_admin(filter, page)
            .await
            .map_err(map_profile_error)
    }

    async fn profile_for_review(&self, id: &ProfileId) -> Result<ProfileReview, Error> {
        self.profiles
            .find_review(id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found(PROFILE_NOT_FOUND_MESSAGE))
    }
}

#[async_trait]
impl<P, U> AdminProfilesCommand for AdminService<P, U>
where
    P: CompanionProfileRepository,
    U: UserRepository,
{
    async fn review_profile(
        &self,
        admin: &UserId,
        id: &ProfileId,
        decision: ReviewDecision,
    ) -> Result<ReviewedProfile, Error> {
        let mut profile = self.load_profile(id).await?;
        let now = self.clock.utc();
        match decision {
            ReviewDecision::Approve => {
                profile.approve(admin.clone(), now);
                info!(profile_id = %id, admin_id = %admin, "companion profile approved");
            }
            ReviewDecision::Reject { reason } => {
                profile.reject(reason.as_deref(), now);
                info!(
                    profile_id = %id,
                    admin_id = %admin,
                    reason = profile.rejection_reason.as_deref().unwrap_or_default(),
                    "companion profile rejected"
                );
            }
        }
        self.profiles
            .save(&profile)
            .await
            .map_err(map_profile_error)?;
        Ok(ReviewedProfile::from(&profile))
    }

    async fn update_profile(
        &self,
        id: &ProfileId,
        edit: &ProfileEdit,
    ) -> Result<CompanionProfile, Error> {
        let mut profile = self.load_profile(id).await?;
        profile.apply_edit(edit, self.clock.utc())?;
        self.profiles
            .save(&profile)
            .await
            .map_err(map_profile_error)?;
        info!(
            profile_id = %id,
            completeness = profile.profile_completeness,
            "companion profile updated by admin"
        );
        Ok(profile)
    }

    async fn delete_profile(&self, id: &ProfileId) -> Result<(), Error> {
        let deleted = self.profiles.delete(id).await.map_err(map_profile_error)?;
        if !deleted {
            return Err(Error::not_found(PROFILE_NOT_FOUND_MESSAGE));
        }
        info!(profile_id = %id, "companion profile deleted");
        Ok(())
    }
}

#[async_trait]
impl<P, U> AdminUsersQuery for AdminService<P, U>
where
    P: CompanionProfileRepository,
    U: UserRepository,
{
    async fn list_users(
        &self,
        filter: &UserListFilter,
        page: PageRequest,
    ) -> Result<Page<AdminUserListing>, Error> {
        self.users.list(filter, page).await.map_err(map_user_error)
    }
}

#[async_trait]
impl<P, U> DashboardStatsQuery for AdminService<P, U>
where
    P: CompanionProfileRepository,
    U: UserRepository,
{
    async fn dashboard_stats(&self) -> Result<DashboardStats, Error> {
        let now = self.clock.utc();
        let since = recent_cutoff(now);
        let profiles = self
            .profiles
            .counts(since)
            .await
            .map_err(map_profile_error)?;
        let users = self.users.counts(since).await.map_err(map_user_error)?;
        Ok(DashboardStats {
            profiles,
            users,
            last_updated: now,
        })
    }
}

#[cfg(test)]
#[path = "admin_service_tests.rs"]
mod tests;
