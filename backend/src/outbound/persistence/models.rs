//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{companion_profiles, users};

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// User columns safe to expose to admins. Excludes `password_hash`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub user_type: String,
    pub phone: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Columns read by the login adapter.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserCredentialsRow {
    pub id: Uuid,
    pub user_type: String,
    pub password_hash: String,
}

/// Owner columns joined into the admin profile listing.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileOwnerRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Owner columns joined into the review fetch.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewOwnerRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub phone: Option<String>,
}

// ---------------------------------------------------------------------------
// Companion profile models
// ---------------------------------------------------------------------------

/// Row struct for reading from the companion_profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companion_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanionProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub display_name: String,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub location_country: Option<String>,
    pub about_me: Option<String>,
    pub services_summary: Option<String>,
    pub rates_summary: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub availability_status: Option<String>,
    pub is_approved: bool,
    pub is_visible: bool,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    pub rejection_reason: Option<String>,
    pub profile_completeness: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile summary columns joined into the admin user listing.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companion_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileSummaryRow {
    pub id: Uuid,
    pub display_name: String,
    pub is_approved: bool,
    pub is_visible: bool,
    pub profile_completeness: i16,
}

/// Insert/update payload for companion profiles.
///
/// `None` writes NULL so approval and rejection fields can be cleared.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = companion_profiles)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CompanionProfileWrite<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub display_name: &'a str,
    pub location_city: Option<&'a str>,
    pub location_state: Option<&'a str>,
    pub location_country: Option<&'a str>,
    pub about_me: Option<&'a str>,
    pub services_summary: Option<&'a str>,
    pub rates_summary: Option<&'a str>,
    pub contact_phone: Option<&'a str>,
    pub contact_email: Option<&'a str>,
    pub availability_status: Option<&'a str>,
    pub is_approved: bool,
    pub is_visible: bool,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    pub rejection_reason: Option<&'a str>,
    pub profile_completeness: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
