//! Tests for the domain user model.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn user() -> User {
    let created = Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    User {
        id: UserId::new(VALID_ID).expect("valid id"),
        name: "Ada Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        user_type: UserType::Companion,
        phone: Some("+44 20 7946 0000".to_owned()),
        email_verified: true,
        created_at: created,
        updated_at: created,
    }
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_preserves_raw_text() {
    let id = UserId::new(VALID_ID).expect("valid id");
    assert_eq!(id.as_ref(), VALID_ID);
    assert_eq!(id.as_uuid().to_string(), VALID_ID);
}

#[rstest]
#[case("Client", UserType::Client)]
#[case("Companion", UserType::Companion)]
#[case("Admin", UserType::Admin)]
fn user_type_parses_stored_values(#[case] raw: &str, #[case] expected: UserType) {
    assert_eq!(raw.parse::<UserType>(), Ok(expected));
    assert_eq!(expected.as_str(), raw);
}

#[rstest]
#[case("admin")]
#[case("ADMIN")]
#[case("Moderator")]
#[case("")]
fn user_type_parsing_is_case_sensitive(#[case] raw: &str) {
    assert!(raw.parse::<UserType>().is_err());
}

#[rstest]
fn filter_ignores_unknown_user_type() {
    let filter = UserListFilter::from_query(Some("Moderator"), None);
    assert_eq!(filter, UserListFilter::default());
}

#[rstest]
fn filter_keeps_known_user_type_and_trimmed_search() {
    let filter = UserListFilter::from_query(Some("Client"), Some("  ada "));
    assert_eq!(filter.user_type, Some(UserType::Client));
    assert_eq!(filter.search.as_ref().map(SearchTerm::as_str), Some("ada"));
}

#[rstest]
fn filter_drops_blank_search() {
    let filter = UserListFilter::from_query(None, Some("   "));
    assert!(filter.search.is_none());
}

#[rstest]
fn user_serialises_without_credentials(user: User) {
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(value["id"], VALID_ID);
    assert_eq!(value["userType"], "Companion");
    assert_eq!(value["emailVerified"], true);
    assert!(value.get("password").is_none());
    assert!(value.get("passwordHash").is_none());
}

#[rstest]
fn listing_flattens_user_fields(user: User) {
    let listing = AdminUserListing {
        user,
        companion_profile: None,
    };
    let value = serde_json::to_value(&listing).expect("serialise listing");
    assert_eq!(value["name"], "Ada Lovelace");
    assert!(value["companionProfile"].is_null());
}
