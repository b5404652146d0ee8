//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! The admin listing left-joins `companion_profiles` so each user carries an
//! optional profile summary. Password hashes are never selected here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    AdminUserListing, ProfileId, ProfileSummary, User, UserCounts, UserId, UserListFilter,
    UserType,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ProfileSummaryRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{companion_profiles, users};

type UserProfileJoin = diesel::dsl::LeftJoin<users::table, companion_profiles::table>;
type BoxedUserListing = diesel::dsl::IntoBoxed<'static, UserProfileJoin, Pg>;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

pub(super) fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let user_type = row.user_type.parse::<UserType>().map_err(|err| {
        UserPersistenceError::query(format!("user {} has invalid type: {err}", row.id))
    })?;
    Ok(User {
        id: UserId::from_uuid(row.id),
        name: row.name,
        email: row.email,
        user_type,
        phone: row.phone,
        email_verified: row.email_verified,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_summary(row: ProfileSummaryRow) -> Result<ProfileSummary, UserPersistenceError> {
    let profile_completeness = u8::try_from(row.profile_completeness).map_err(|_| {
        UserPersistenceError::query(format!(
            "profile {} has out-of-range completeness {}",
            row.id, row.profile_completeness
        ))
    })?;
    Ok(ProfileSummary {
        id: ProfileId::from_uuid(row.id),
        display_name: row.display_name,
        is_approved: row.is_approved,
        is_visible: row.is_visible,
        profile_completeness,
    })
}

fn listing_query(filter: &UserListFilter) -> BoxedUserListing {
    let mut query = users::table
        .left_join(companion_profiles::table)
        .into_boxed();

    if let Some(user_type) = filter.user_type {
        query = query.filter(users::user_type.eq(user_type.as_str()));
    }
    if let Some(term) = &filter.search {
        let pattern = term.like_pattern();
        query = query.filter(
            users::name
                .ilike(pattern.clone())
                .or(users::email.ilike(pattern)),
        );
    }
    query
}

pub(super) fn page_bounds<E>(
    page: PageRequest,
    error: impl FnOnce(&'static str) -> E,
) -> Result<(i64, i64), E> {
    let offset = i64::try_from(page.offset()).map_err(|_| error("page offset out of range"))?;
    Ok((i64::from(page.limit()), offset))
}

pub(super) fn count_to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(
        &self,
        filter: &UserListFilter,
        page: PageRequest,
    ) -> Result<Page<AdminUserListing>, UserPersistenceError> {
        let (limit, offset) = page_bounds(page, UserPersistenceError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = listing_query(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<(UserRow, Option<ProfileSummaryRow>)> = listing_query(filter)
            .select((
                UserRow::as_select(),
                Option::<ProfileSummaryRow>::as_select(),
            ))
            .order((users::created_at.desc(), users::id.desc()))
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(|(user, profile)| {
                Ok(AdminUserListing {
                    user: row_to_user(user)?,
                    companion_profile: profile.map(row_to_summary).transpose()?,
                })
            })
            .collect::<Result<Vec<_>, UserPersistenceError>>()?;

        Ok(Page::new(items, count_to_u64(total), page))
    }

    async fn counts(&self, since: DateTime<Utc>) -> Result<UserCounts, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let companions: i64 = users::table
            .filter(users::user_type.eq(UserType::Companion.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let clients: i64 = users::table
            .filter(users::user_type.eq(UserType::Client.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let recent: i64 = users::table
            .filter(users::created_at.ge(since))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(UserCounts {
            total: count_to_u64(total),
            companions: count_to_u64(companions),
            clients: count_to_u64(clients),
            recently_registered: count_to_u64(recent),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Row mapping coverage; query behaviour is exercised against embedded
    //! PostgreSQL in `backend/tests`.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn user_row(user_type: &str) -> UserRow {
        let now = Utc::now();
        UserRow {
            id: Uuid::new_v4(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            user_type: user_type.to_owned(),
            phone: None,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn known_user_type_maps_to_domain() {
        let user = row_to_user(user_row("Admin")).expect("valid row");
        assert_eq!(user.user_type, UserType::Admin);
    }

    #[rstest]
    fn unknown_user_type_is_a_query_error() {
        let err = row_to_user(user_row("Root")).expect_err("invalid type");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    #[case(-1)]
    #[case(101_i16 + 200)]
    fn completeness_outside_u8_is_rejected(#[case] value: i16) {
        let row = ProfileSummaryRow {
            id: Uuid::new_v4(),
            display_name: "Luna".to_owned(),
            is_approved: false,
            is_visible: true,
            profile_completeness: value,
        };
        assert!(row_to_summary(row).is_err());
    }

    #[rstest]
    fn page_bounds_convert_offset() {
        let page = PageRequest::new(3, 25).expect("valid page");
        let bounds: Result<(i64, i64), ()> = page_bounds(page, |_| ());
        assert_eq!(bounds, Ok((25, 50)));
    }
}
