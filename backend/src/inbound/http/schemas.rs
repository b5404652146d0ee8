//! Request and response bodies shared by the profile endpoints.
//!
//! Domain types derive their own schemas; this module holds the JSON
//! envelopes that only exist at the HTTP boundary.

use chrono::{DateTime, Utc};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AdminProfileListing, AdminUserListing, CompanionProfile, ProfileEdit, ProfileId,
    ReviewedProfile,
};

/// Editable profile fields. Unknown fields are ignored.
///
/// Omitted fields stay unchanged. A blank string clears an optional field.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEditRequest {
    #[schema(example = "Luna")]
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

impl From<ProfileEditRequest> for ProfileEdit {
    fn from(value: ProfileEditRequest) -> Self {
        Self {
            display_name: value.display_name,
            location_city: value.location_city,
            location_state: value.location_state,
            location_country: value.location_country,
            about_me: value.about_me,
            services_summary: value.services_summary,
            rates_summary: value.rates_summary,
            contact_phone: value.contact_phone,
            contact_email: value.contact_email,
            availability_status: value.availability_status,
        }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Profile deleted successfully.")]
    pub message: String,
}

/// Outcome of an approve/reject decision.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    #[schema(example = "Profile approved successfully.")]
    pub message: String,
    pub profile: ReviewedProfile,
}

/// Profile returned after an edit.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(example = "Profile updated successfully by admin.")]
    pub message: String,
    pub profile: CompanionProfile,
}

/// Profile as shown to anonymous visitors.
///
/// Moderation state and the owner's account id stay private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    #[schema(value_type = String, example = "9b2f4c1e-0d6a-4b8e-9f3a-2c1d5e7f8a90")]
    pub id: ProfileId,
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
    #[schema(minimum = 0, maximum = 100)]
    pub profile_completeness: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CompanionProfile> for PublicProfile {
    fn from(profile: CompanionProfile) -> Self {
        Self {
            id: profile.id,
            display_name: profile.display_name,
            location_city: profile.location_city,
            location_state: profile.location_state,
            location_country: profile.location_country,
            about_me: profile.about_me,
            services_summary: profile.services_summary,
            rates_summary: profile.rates_summary,
            contact_phone: profile.contact_phone,
            contact_email: profile.contact_email,
            availability_status: profile.availability_status,
            profile_completeness: profile.profile_completeness,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

macro_rules! page_envelope {
    ($(#[$meta:meta])* $name:ident, $field:ident: $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Serialize, ToSchema)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub total_items: u64,
            pub total_pages: u64,
            pub current_page: u32,
            pub $field: Vec<$item>,
        }

        impl From<Page<$item>> for $name {
            fn from(page: Page<$item>) -> Self {
                Self {
                    total_items: page.total_items(),
                    total_pages: page.total_pages(),
                    current_page: page.current_page(),
                    $field: page.into_items(),
                }
            }
        }
    };
}

page_envelope!(
    /// One page of the admin profile listing.
    AdminProfilePage,
    profiles: AdminProfileListing
);
page_envelope!(
    /// One page of public search results.
    PublicProfilePage,
    profiles: PublicProfile
);

impl From<Page<CompanionProfile>> for PublicProfilePage {
    fn from(page: Page<CompanionProfile>) -> Self {
        page.map(PublicProfile::from).into()
    }
}
page_envelope!(
    /// One page of the admin user listing.
    UserPage,
    users: AdminUserListing
);

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::UserId;
    use crate::inbound::http::test_utils::sample_profile;
    use pagination::PageRequest;
    use rstest::rstest;

    #[rstest]
    fn edit_request_ignores_unknown_fields() {
        let body = serde_json::json!({
            "displayName": "Luna",
            "isApproved": true,
            "userId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        });
        let request: ProfileEditRequest = serde_json::from_value(body).expect("lenient body");
        let edit = ProfileEdit::from(request);
        assert_eq!(edit.display_name.as_deref(), Some("Luna"));
        assert_eq!(
            edit,
            ProfileEdit {
                display_name: Some("Luna".to_owned()),
                ..ProfileEdit::default()
            }
        );
    }

    #[rstest]
    fn public_projection_omits_moderation_fields() {
        let mut profile = sample_profile(UserId::random());
        profile.is_approved = true;
        profile.approved_by = Some(UserId::random());
        profile.approved_at = Some(profile.created_at);
        profile.rejection_reason = Some("Earlier rejection".to_owned());

        let value = serde_json::to_value(PublicProfile::from(profile)).expect("serialise profile");

        assert_eq!(value["displayName"], "Luna");
        for hidden in [
            "approvedBy",
            "approvedAt",
            "rejectionReason",
            "isApproved",
            "isVisible",
            "userId",
        ] {
            assert!(value.get(hidden).is_none(), "{hidden} leaked");
        }
    }

    #[rstest]
    fn page_envelope_names_the_item_list() {
        let request = PageRequest::new(2, 1).expect("valid request");
        let page: Page<AdminUserListing> = Page::new(Vec::new(), 3, request);
        let value = serde_json::to_value(UserPage::from(page)).expect("serialise page");
        assert_eq!(value["totalItems"], 3);
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["currentPage"], 2);
        assert!(value["users"].as_array().is_some_and(Vec::is_empty));
        assert!(value.get("items").is_none());
    }
}
