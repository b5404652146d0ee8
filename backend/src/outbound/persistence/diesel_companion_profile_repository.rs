//! PostgreSQL-backed `CompanionProfileRepository` implementation.
//!
//! Admin listings inner-join the owning user; public search reads
//! `companion_profiles` alone and only ever returns approved, visible rows.
//! Status predicates mirror [`CompanionProfile::status`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{CompanionProfileRepository, ProfilePersistenceError};
use crate::domain::{
    AdminProfileListing, CompanionProfile, PENDING_COMPLETENESS_THRESHOLD, ProfileCounts,
    ProfileId, ProfileListFilter, ProfileOwner, ProfileReview, ProfileStatus, PublicProfileSearch,
    ReviewOwner, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_pool_error, map_diesel_error_with_conflict};
use super::diesel_user_repository::{count_to_u64, page_bounds};
use super::models::{CompanionProfileRow, CompanionProfileWrite, ProfileOwnerRow, ReviewOwnerRow};
use super::pool::{DbPool, PoolError};
use super::schema::{companion_profiles, users};

type ProfileOwnerJoin = diesel::dsl::InnerJoin<companion_profiles::table, users::table>;
type BoxedAdminListing = diesel::dsl::IntoBoxed<'static, ProfileOwnerJoin, Pg>;
type BoxedPublicSearch = companion_profiles::BoxedQuery<'static, Pg>;

/// Diesel-backed implementation of the `CompanionProfileRepository` port.
#[derive(Clone)]
pub struct DieselCompanionProfileRepository {
    pool: DbPool,
}

impl DieselCompanionProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfilePersistenceError {
    map_basic_pool_error(error, ProfilePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProfilePersistenceError {
    map_diesel_error_with_conflict(
        error,
        ProfilePersistenceError::query,
        ProfilePersistenceError::connection,
        ProfilePersistenceError::conflict,
    )
}

fn pending_threshold() -> i16 {
    i16::from(PENDING_COMPLETENESS_THRESHOLD)
}

fn row_to_profile(row: CompanionProfileRow) -> Result<CompanionProfile, ProfilePersistenceError> {
    let profile_completeness = u8::try_from(row.profile_completeness).map_err(|_| {
        ProfilePersistenceError::query(format!(
            "profile {} has out-of-range completeness {}",
            row.id, row.profile_completeness
        ))
    })?;
    Ok(CompanionProfile {
        id: ProfileId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        display_name: row.display_name,
        location_city: row.location_city,
        location_state: row.location_state,
        location_country: row.location_country,
        about_me: row.about_me,
        services_summary: row.services_summary,
        rates_summary: row.rates_summary,
        contact_phone: row.contact_phone,
        contact_email: row.contact_email,
        availability_status: row.availability_status,
        is_approved: row.is_approved,
        is_visible: row.is_visible,
        approved_at: row.approved_at,
        approved_by: row.approved_by.map(UserId::from_uuid),
        rejection_reason: row.rejection_reason,
        profile_completeness,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_owner(row: ProfileOwnerRow) -> ProfileOwner {
    ProfileOwner {
        id: UserId::from_uuid(row.id),
        name: row.name,
        email: row.email,
        email_verified: row.email_verified,
        created_at: row.created_at,
    }
}

fn row_to_review_owner(row: ReviewOwnerRow) -> ReviewOwner {
    ReviewOwner {
        owner: ProfileOwner {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            email_verified: row.email_verified,
            created_at: row.created_at,
        },
        phone: row.phone,
    }
}

fn to_write(profile: &CompanionProfile) -> CompanionProfileWrite<'_> {
    CompanionProfileWrite {
        id: *profile.id.as_uuid(),
        user_id: *profile.user_id.as_uuid(),
        display_name: profile.display_name.as_str(),
        location_city: profile.location_city.as_deref(),
        location_state: profile.location_state.as_deref(),
        location_country: profile.location_country.as_deref(),
        about_me: profile.about_me.as_deref(),
        services_summary: profile.services_summary.as_deref(),
        rates_summary: profile.rates_summary.as_deref(),
        contact_phone: profile.contact_phone.as_deref(),
        contact_email: profile.contact_email.as_deref(),
        availability_status: profile.availability_status.as_deref(),
        is_approved: profile.is_approved,
        is_visible: profile.is_visible,
        approved_at: profile.approved_at,
        approved_by: profile.approved_by.as_ref().map(|id| *id.as_uuid()),
        rejection_reason: profile.rejection_reason.as_deref(),
        profile_completeness: i16::from(profile.profile_completeness),
        created_at: profile.created_at,
        updated_at: profile.updated_at,
    }
}

fn admin_listing_query(filter: &ProfileListFilter) -> BoxedAdminListing {
    let mut query = companion_profiles::table
        .inner_join(users::table)
        .into_boxed();

    match filter.status {
        Some(ProfileStatus::Pending) => {
            query = query
                .filter(companion_profiles::is_approved.eq(false))
                .filter(companion_profiles::rejection_reason.is_null())
                .filter(companion_profiles::profile_completeness.ge(pending_threshold()));
        }
        Some(ProfileStatus::Approved) => {
            query = query.filter(companion_profiles::is_approved.eq(true));
        }
        Some(ProfileStatus::Rejected) => {
            query = query
                .filter(companion_profiles::is_approved.eq(false))
                .filter(companion_profiles::rejection_reason.is_not_null());
        }
        None => {}
    }

    if let Some(term) = &filter.search {
        let pattern = term.like_pattern();
        query = query.filter(
            companion_profiles::display_name
                .ilike(pattern.clone())
                .or(users::name.ilike(pattern.clone()))
                .or(companion_profiles::location_city.ilike(pattern)),
        );
    }
    query
}

fn public_search_query(search: &PublicProfileSearch) -> BoxedPublicSearch {
    let mut query = companion_profiles::table
        .filter(companion_profiles::is_approved.eq(true))
        .filter(companion_profiles::is_visible.eq(true))
        .into_boxed();

    if let Some(term) = &search.query {
        let pattern = term.like_pattern();
        query = query.filter(
            companion_profiles::display_name
                .ilike(pattern.clone())
                .or(companion_profiles::location_city.ilike(pattern.clone()))
                .or(companion_profiles::about_me.ilike(pattern)),
        );
    }
    if let Some(city) = &search.city {
        query = query.filter(companion_profiles::location_city.ilike(city.like_pattern()));
    }
    query
}

#[async_trait]
impl CompanionProfileRepository for DieselCompanionProfileRepository {
    async fn find_by_id(
        &self,
        id: &ProfileId,
    ) -> Result<Option<CompanionProfile>, ProfilePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CompanionProfileRow> = companion_profiles::table
            .filter(companion_profiles::id.eq(id.as_uuid()))
            .select(CompanionProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }

    async fn find_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<CompanionProfile>, ProfilePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CompanionProfileRow> = companion_profiles::table
            .filter(companion_profiles::user_id.eq(owner.as_uuid()))
            .select(CompanionProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }

    async fn find_review(
        &self,
        id: &ProfileId,
    ) -> Result<Option<ProfileReview>, ProfilePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(CompanionProfileRow, ReviewOwnerRow)> = companion_profiles::table
            .inner_join(users::table)
            .filter(companion_profiles::id.eq(id.as_uuid()))
            .select((CompanionProfileRow::as_select(), ReviewOwnerRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|(profile, owner)| {
            Ok(ProfileReview {
                profile: row_to_profile(profile)?,
                user: row_to_review_owner(owner),
            })
        })
        .transpose()
    }

    async fn list_for_admin(
        &self,
        filter: &ProfileListFilter,
        page: PageRequest,
    ) -> Result<Page<AdminProfileListing>, ProfilePersistenceError> {
        let (limit, offset) = page_bounds(page, ProfilePersistenceError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = admin_listing_query(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<(CompanionProfileRow, ProfileOwnerRow)> = admin_listing_query(filter)
            .select((CompanionProfileRow::as_select(), ProfileOwnerRow::as_select()))
            .order((
                companion_profiles::created_at.desc(),
                companion_profiles::id.desc(),
            ))
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(|(profile, owner)| {
                Ok(AdminProfileListing {
                    profile: row_to_profile(profile)?,
                    user: row_to_owner(owner),
                })
            })
            .collect::<Result<Vec<_>, ProfilePersistenceError>>()?;

        Ok(Page::new(items, count_to_u64(total), page))
    }

    async fn search_public(
        &self,
        search: &PublicProfileSearch,
        page: PageRequest,
    ) -> Result<Page<CompanionProfile>, ProfilePersistenceError> {
        let (limit, offset) = page_bounds(page, ProfilePersistenceError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = public_search_query(search)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<CompanionProfileRow> = public_search_query(search)
            .select(CompanionProfileRow::as_select())
            .order((
                companion_profiles::created_at.desc(),
                companion_profiles::id.desc(),
            ))
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(row_to_profile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, count_to_u64(total), page))
    }

    async fn save(&self, profile: &CompanionProfile) -> Result<(), ProfilePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = to_write(profile);

        diesel::insert_into(companion_profiles::table)
            .values(&row)
            .on_conflict(companion_profiles::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &ProfileId) -> Result<bool, ProfilePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            companion_profiles::table.filter(companion_profiles::id.eq(id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<ProfileCounts, ProfilePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = companion_profiles::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        // Counts every unapproved profile over the threshold, rejected ones
        // included; the `?status=pending` listing also excludes rejections.
        let pending: i64 = companion_profiles::table
            .filter(companion_profiles::is_approved.eq(false))
            .filter(companion_profiles::profile_completeness.ge(pending_threshold()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let approved: i64 = companion_profiles::table
            .filter(companion_profiles::is_approved.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rejected: i64 = companion_profiles::table
            .filter(companion_profiles::is_approved.eq(false))
            .filter(companion_profiles::rejection_reason.is_not_null())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let recent: i64 = companion_profiles::table
            .filter(companion_profiles::created_at.ge(since))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ProfileCounts {
            total: count_to_u64(total),
            pending: count_to_u64(pending),
            approved: count_to_u64(approved),
            rejected: count_to_u64(rejected),
            recently_created: count_to_u64(recent),
        })
    }
}
