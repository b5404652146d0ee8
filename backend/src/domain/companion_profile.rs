//! Companion profile aggregate and its admin review lifecycle.
//!
//! A profile is owned by exactly one user and moves through three derived
//! states:
//!
//! | Status   | Predicate                                                    |
//! |----------|--------------------------------------------------------------|
//! | pending  | not approved, no rejection reason, completeness at least 70  |
//! | approved | approved                                                     |
//! | rejected | not approved, rejection reason present                       |
//!
//! Profiles below the completeness threshold that were never reviewed belong
//! to none of the three.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Error, SearchTerm, UserId};

/// Minimum completeness for an unreviewed profile to count as pending.
pub const PENDING_COMPLETENESS_THRESHOLD: u8 = 70;
/// Rejection reason recorded when the admin supplies none.
pub const DEFAULT_REJECTION_REASON: &str = "Profile rejected by admin.";
/// Maximum length of the display name and other single-line fields.
pub const SHORT_FIELD_MAX: usize = 100;
/// Maximum length of free-text fields.
pub const LONG_FIELD_MAX: usize = 2000;

/// Stable profile identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProfileId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Review state derived from the approval fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for ProfileStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(()),
        }
    }
}

/// Companion profile as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanionProfile {
    #[schema(value_type = String, example = "9b2f4c1e-0d6a-4b8e-9f3a-2c1d5e7f8a90")]
    pub id: ProfileId,
    #[schema(value_type = String)]
    pub user_id: UserId,
    #[schema(example = "Luna")]
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
    #[schema(value_type = Option<String>)]
    pub approved_by: Option<UserId>,
    pub rejection_reason: Option<String>,
    #[schema(minimum = 0, maximum = 100)]
    pub profile_completeness: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompanionProfile {
    /// Create an unreviewed, visible profile for `owner`.
    pub fn draft(owner: UserId, display_name: String, now: DateTime<Utc>) -> Self {
        let mut profile = Self {
            id: ProfileId::random(),
            user_id: owner,
            display_name,
            location_city: None,
            location_state: None,
            location_country: None,
            about_me: None,
            services_summary: None,
            rates_summary: None,
            contact_phone: None,
            contact_email: None,
            availability_status: None,
            is_approved: false,
            is_visible: true,
            approved_at: None,
            approved_by: None,
            rejection_reason: None,
            profile_completeness: 0,
            created_at: now,
            updated_at: now,
        };
        profile.profile_completeness = profile.completeness_score();
        profile
    }

    /// Derived review status, if the profile is in one.
    pub fn status(&self) -> Option<ProfileStatus> {
        if self.is_approved {
            Some(ProfileStatus::Approved)
        } else if self.rejection_reason.is_some() {
            Some(ProfileStatus::Rejected)
        } else if self.profile_completeness >= PENDING_COMPLETENESS_THRESHOLD {
            Some(ProfileStatus::Pending)
        } else {
            None
        }
    }

    /// Whether the public may see this profile.
    pub fn is_public(&self) -> bool {
        self.is_approved && self.is_visible
    }

    /// Mark the profile approved by `admin`.
    ///
    /// Clears any earlier rejection reason. Visibility is left untouched.
    pub fn approve(&mut self, admin: UserId, now: DateTime<Utc>) {
        self.is_approved = true;
        self.approved_at = Some(now);
        self.approved_by = Some(admin);
        self.rejection_reason = None;
        self.updated_at = now;
    }

    /// Mark the profile rejected and hide it.
    ///
    /// A missing or blank reason records [`DEFAULT_REJECTION_REASON`].
    pub fn reject(&mut self, reason: Option<&str>, now: DateTime<Utc>) {
        let reason = reason
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_REJECTION_REASON);
        self.is_approved = false;
        self.approved_at = None;
        self.approved_by = None;
        self.is_visible = false;
        self.rejection_reason = Some(reason.to_owned());
        self.updated_at = now;
    }

    /// Apply a whitelisted edit after validating every supplied field.
    ///
    /// Nothing changes when validation fails. Approval fields are never
    /// touched; completeness is recomputed.
    pub fn apply_edit(
        &mut self,
        edit: &ProfileEdit,
        now: DateTime<Utc>,
    ) -> Result<(), ProfileValidationError> {
        edit.validate()?;

        if let Some(name) = &edit.display_name {
            name.trim().clone_into(&mut self.display_name);
        }
        let optional_fields = [
            (&edit.location_city, &mut self.location_city),
            (&edit.location_state, &mut self.location_state),
            (&edit.location_country, &mut self.location_country),
            (&edit.about_me, &mut self.about_me),
            (&edit.services_summary, &mut self.services_summary),
            (&edit.rates_summary, &mut self.rates_summary),
            (&edit.contact_phone, &mut self.contact_phone),
            (&edit.contact_email, &mut self.contact_email),
            (&edit.availability_status, &mut self.availability_status),
        ];
        for (incoming, current) in optional_fields {
            if let Some(value) = incoming {
                *current = non_blank(value);
            }
        }

        self.profile_completeness = self.completeness_score();
        self.updated_at = now;
        Ok(())
    }

    /// Ten points for each editable field that carries a non-blank value.
    pub fn completeness_score(&self) -> u8 {
        let optional = [
            &self.location_city,
            &self.location_state,
            &self.location_country,
            &self.about_me,
            &self.services_summary,
            &self.rates_summary,
            &self.contact_phone,
            &self.contact_email,
            &self.availability_status,
        ];
        let filled = optional
            .into_iter()
            .filter(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
            .count()
            + usize::from(!self.display_name.trim().is_empty());
        // At most ten fields, so the product fits comfortably.
        u8::try_from(filled * 10).unwrap_or(100)
    }

    /// Compact projection embedded in admin user listings.
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            id: self.id,
            display_name: self.display_name.clone(),
            is_approved: self.is_approved,
            is_visible: self.is_visible,
            profile_completeness: self.profile_completeness,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Field edit accepted from admins and owners.
///
/// `None` leaves a field unchanged. For optional fields a blank string clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEdit {
    pub display_name: Option<String>,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub location_country: Option<String>,
    pub about_me: Option<String>,
    pub services_summary: Option<String>,
    pub rates_summary: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub availability_status: Option<String>,
}

impl ProfileEdit {
    /// Check every supplied field and collect all violations.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        let mut messages = Vec::new();

        if let Some(name) = &self.display_name {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                messages.push("displayName must not be empty".to_owned());
            } else if trimmed.chars().count() > SHORT_FIELD_MAX {
                messages.push(format!(
                    "displayName must be at most {SHORT_FIELD_MAX} characters"
                ));
            }
        }

        let limits = [
            ("locationCity", &self.location_city, SHORT_FIELD_MAX),
            ("locationState", &self.location_state, SHORT_FIELD_MAX),
            ("locationCountry", &self.location_country, SHORT_FIELD_MAX),
            ("aboutMe", &self.about_me, LONG_FIELD_MAX),
            ("servicesSummary", &self.services_summary, LONG_FIELD_MAX),
            ("ratesSummary", &self.rates_summary, LONG_FIELD_MAX),
            ("contactPhone", &self.contact_phone, SHORT_FIELD_MAX),
            ("contactEmail", &self.contact_email, SHORT_FIELD_MAX),
            ("availabilityStatus", &self.availability_status, SHORT_FIELD_MAX),
        ];
        for (field, value, max) in limits {
            if let Some(value) = value
                && value.trim().chars().count() > max
            {
                messages.push(format!("{field} must be at most {max} characters"));
            }
        }

        if let Some(email) = self.contact_email.as_deref().map(str::trim)
            && !email.is_empty()
            && !looks_like_email(email)
        {
            messages.push("contactEmail must be a valid email address".to_owned());
        }

        if messages.is_empty() {
            Ok(())
        } else {
            Err(ProfileValidationError { messages })
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Every violation found while validating a [`ProfileEdit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileValidationError {
    messages: Vec<String>,
}

impl ProfileValidationError {
    /// Error carrying one violation.
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Violation messages in field order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join("; "))
    }
}

impl std::error::Error for ProfileValidationError {}

impl From<ProfileValidationError> for Error {
    fn from(value: ProfileValidationError) -> Self {
        Error::invalid_request("Validation Error").with_details(json!({
            "errors": value.messages,
        }))
    }
}

/// Admin listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileListFilter {
    pub status: Option<ProfileStatus>,
    /// Case-insensitive partial match on display name, owner name, or city.
    pub search: Option<SearchTerm>,
}

impl ProfileListFilter {
    /// Build a filter from raw query values, ignoring unknown statuses.
    pub fn from_query(status: Option<&str>, search: Option<&str>) -> Self {
        Self {
            status: status.and_then(|raw| raw.parse().ok()),
            search: search.and_then(SearchTerm::new),
        }
    }
}

/// Public search criteria. Only approved and visible profiles ever match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicProfileSearch {
    /// Matches display name, city, or about text.
    pub query: Option<SearchTerm>,
    /// Matches city only.
    pub city: Option<SearchTerm>,
}

/// Owner fields shown beside a profile in admin listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOwner {
    #[schema(value_type = String)]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Owner fields shown on the review screen, which adds the phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOwner {
    #[serde(flatten)]
    pub owner: ProfileOwner,
    pub phone: Option<String>,
}

/// Admin listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfileListing {
    #[serde(flatten)]
    pub profile: CompanionProfile,
    pub user: ProfileOwner,
}

/// Profile with owner contact data, as fetched for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReview {
    #[serde(flatten)]
    pub profile: CompanionProfile,
    pub user: ReviewOwner,
}

/// Compact profile projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    #[schema(value_type = String)]
    pub id: ProfileId,
    pub display_name: String,
    pub is_approved: bool,
    pub is_visible: bool,
    pub profile_completeness: u8,
}

/// Admin verdict on a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject { reason: Option<String> },
}

/// Approval fields returned after a review decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedProfile {
    #[schema(value_type = String)]
    pub id: ProfileId,
    pub is_approved: bool,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub is_visible: bool,
}

impl From<&CompanionProfile> for ReviewedProfile {
    fn from(profile: &CompanionProfile) -> Self {
        Self {
            id: profile.id,
            is_approved: profile.is_approved,
            approved_at: profile.approved_at,
            rejection_reason: profile.rejection_reason.clone(),
            is_visible: profile.is_visible,
        }
    }
}
