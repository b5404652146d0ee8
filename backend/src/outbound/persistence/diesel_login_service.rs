//! Diesel-backed `LoginService` adapter.
//!
//! Looks the user up by normalised email and verifies the stored Argon2 PHC
//! string. Unknown emails and wrong passwords are indistinguishable to the
//! caller.

use argon2::password_hash::Error as PasswordHashError;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::admin_service::map_user_error;
use crate::domain::ports::{LoginService, UserPersistenceError};
use crate::domain::{AuthenticatedUser, Error, LoginCredentials, UserId, UserType};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserCredentialsRow;
use super::pool::DbPool;
use super::schema::users;

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Diesel-backed `LoginService` verifying Argon2 password hashes.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentialsRow>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, UserPersistenceError::connection))?;

        users::table
            .filter(users::email.eq(email))
            .select(UserCredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                map_basic_diesel_error(
                    err,
                    UserPersistenceError::query,
                    UserPersistenceError::connection,
                )
            })
    }
}

/// Check `password` against a PHC-formatted Argon2 hash.
///
/// Returns `Ok(false)` on mismatch and an internal error when the stored hash
/// cannot be parsed or verified.
fn verify_password(stored_hash: &str, password: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| Error::internal(format!("stored password hash is malformed: {err}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(err) => Err(Error::internal(format!(
            "password verification failed: {err}"
        ))),
    }
}

/// Run [`verify_password`] on the blocking pool; Argon2 is deliberately slow.
async fn verify_password_off_thread(stored_hash: String, password: &str) -> Result<bool, Error> {
    let password = Zeroizing::new(password.to_owned());
    tokio::task::spawn_blocking(move || verify_password(&stored_hash, &password))
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
}

fn authenticated_from_row(row: UserCredentialsRow) -> Result<AuthenticatedUser, Error> {
    let user_type = row.user_type.parse::<UserType>().map_err(|err| {
        Error::internal(format!("user {} has invalid type: {err}", row.id))
    })?;
    Ok(AuthenticatedUser {
        id: UserId::from_uuid(row.id),
        user_type,
    })
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        let Some(mut row) = self
            .find_credentials(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let password_hash = std::mem::take(&mut row.password_hash);
        if !verify_password_off_thread(password_hash, credentials.password()).await? {
            warn!(user_id = %row.id, "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        authenticated_from_row(row)
    }
}
