//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` is stored lower-cased and is unique. `user_type` is one of
    /// `Client`, `Companion`, or `Admin` (enforced by a check constraint).
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// Argon2 PHC string. Never selected outside the login adapter.
        password_hash -> Text,
        user_type -> Varchar,
        phone -> Nullable<Varchar>,
        email_verified -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Companion profiles, at most one per user.
    companion_profiles (id) {
        id -> Uuid,
        /// Owning user; unique, cascades on user deletion.
        user_id -> Uuid,
        display_name -> Varchar,
        location_city -> Nullable<Varchar>,
        location_state -> Nullable<Varchar>,
        location_country -> Nullable<Varchar>,
        about_me -> Nullable<Text>,
        services_summary -> Nullable<Text>,
        rates_summary -> Nullable<Text>,
        contact_phone -> Nullable<Varchar>,
        contact_email -> Nullable<Varchar>,
        availability_status -> Nullable<Varchar>,
        is_approved -> Bool,
        is_visible -> Bool,
        approved_at -> Nullable<Timestamptz>,
        /// Admin who approved the profile; set to NULL if that user is removed.
        approved_by -> Nullable<Uuid>,
        rejection_reason -> Nullable<Text>,
        /// 0..=100, enforced by a check constraint.
        profile_completeness -> Int2,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(companion_profiles -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(companion_profiles, users);
