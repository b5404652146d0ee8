//! User data model.
//!
//! Users are created by the registration flow, which lives outside this
//! service. Here they are read for admin listings, profile ownership, and
//! login. The password hash never leaves the persistence adapter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::SearchTerm;
use super::companion_profile::ProfileSummary;

/// Validation errors raised while parsing user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    UnknownUserType { value: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::UnknownUserType { value } => write!(f, "unknown user type: {value}"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Account role. Parsing is case-sensitive and matches the stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum UserType {
    Client,
    Companion,
    Admin,
}

impl UserType {
    /// Stored and serialised representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Companion => "Companion",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Client" => Ok(Self::Client),
            "Companion" => Ok(Self::Companion),
            "Admin" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownUserType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Application user as exposed to admins. Carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub user_type: UserType,
    pub phone: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filter for the admin user listing.
///
/// Both criteria are optional; absent criteria match every user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListFilter {
    pub user_type: Option<UserType>,
    /// Case-insensitive partial match against name or email.
    pub search: Option<SearchTerm>,
}

impl UserListFilter {
    /// Build a filter from raw query values.
    ///
    /// Unrecognised user types are ignored rather than rejected, so
    /// `?userType=Unknown` lists every user.
    pub fn from_query(user_type: Option<&str>, search: Option<&str>) -> Self {
        Self {
            user_type: user_type.and_then(|raw| raw.parse().ok()),
            search: search.and_then(SearchTerm::new),
        }
    }
}

/// One row of the admin user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserListing {
    #[serde(flatten)]
    pub user: User,
    /// Summary of the user's companion profile, when one exists.
    pub companion_profile: Option<ProfileSummary>,
}

#[cfg(test)]
mod tests;
