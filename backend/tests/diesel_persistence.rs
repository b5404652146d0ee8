//! Diesel adapters against embedded PostgreSQL.
//!
//! Opt in with `RUN_PG_EMBEDDED=1 cargo test -- --ignored`.

mod support;

use chrono::{DateTime, TimeZone, Utc};
use companion_backend::domain::ports::{
    CompanionProfileRepository, LoginService, ProfilePersistenceError, UserRepository,
};
use companion_backend::domain::{
    CompanionProfile, ErrorCode, LoginCredentials, ProfileListFilter, ProfileStatus,
    PublicProfileSearch, SearchTerm, UserListFilter, UserType,
};
use companion_backend::outbound::persistence::{
    DieselCompanionProfileRepository, DieselLoginService, DieselUserRepository,
};
use pagination::PageRequest;
use rstest::{fixture, rstest};
use support::{SEED_PASSWORD, TestDatabase, embedded_postgres_enabled};

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn database() -> Option<TestDatabase> {
    if !embedded_postgres_enabled() {
        return None;
    }
    Some(TestDatabase::start().expect("embedded PostgreSQL should start"))
}

fn complete_profile(db: &TestDatabase, name: &str, city: &str, day: u32) -> CompanionProfile {
    let owner = db.seed_user(
        name,
        &format!("{}@example.com", name.to_lowercase()),
        UserType::Companion,
        at(day),
    );
    let mut profile = CompanionProfile::draft(owner, name.to_owned(), at(day));
    profile.location_city = Some(city.to_owned());
    profile.location_country = Some("Portugal".to_owned());
    profile.about_me = Some("Museums and long walks".to_owned());
    profile.services_summary = Some("City tours".to_owned());
    profile.rates_summary = Some("On request".to_owned());
    profile.availability_status = Some("Weekends".to_owned());
    profile.profile_completeness = profile.completeness_score();
    profile
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn saved_profiles_round_trip(database: Option<TestDatabase>) {
    let Some(db) = database else { return };
    let repo = DieselCompanionProfileRepository::new(db.pool.clone());
    let profile = complete_profile(&db, "Luna", "Lisbon", 1);

    let (by_id, by_owner, review) = db.runtime.block_on(async {
        repo.save(&profile).await.expect("insert");
        (
            repo.find_by_id(&profile.id).await.expect("by id"),
            repo.find_by_owner(&profile.user_id).await.expect("by owner"),
            repo.find_review(&profile.id).await.expect("review"),
        )
    });

    assert_eq!(by_id.as_ref(), Some(&profile));
    assert_eq!(by_owner.as_ref(), Some(&profile));
    let review = review.expect("review row");
    assert_eq!(review.user.owner.name, "Luna");
    assert_eq!(review.user.phone.as_deref(), Some("+351 900 000 000"));
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn review_outcomes_drive_listing_and_counts(database: Option<TestDatabase>) {
    let Some(db) = database else { return };
    let repo = DieselCompanionProfileRepository::new(db.pool.clone());
    let admin = db.seed_user("Root", "root@example.com", UserType::Admin, at(1));
    let mut approved = complete_profile(&db, "Ana", "Porto", 2);
    let mut rejected = complete_profile(&db, "Bea", "Faro", 3);
    let pending = complete_profile(&db, "Cid", "Braga", 4);
    approved.approve(admin, at(5));
    rejected.reject(Some("Blurry photos"), at(5));

    let (pending_page, approved_page, everything, counts) = db.runtime.block_on(async {
        for profile in [&approved, &rejected, &pending] {
            repo.save(profile).await.expect("insert");
        }
        let page = PageRequest::default();
        (
            repo.list_for_admin(&ProfileListFilter::from_query(Some("pending"), None), page)
                .await
                .expect("pending"),
            repo.list_for_admin(&ProfileListFilter::from_query(Some("approved"), None), page)
                .await
                .expect("approved"),
            repo.list_for_admin(&ProfileListFilter::default(), page)
                .await
                .expect("all"),
            repo.counts(at(3)).await.expect("counts"),
        )
    });

    assert_eq!(pending_page.total_items(), 1);
    assert_eq!(pending_page.items()[0].profile.status(), Some(ProfileStatus::Pending));
    assert_eq!(approved_page.items()[0].profile.display_name, "Ana");
    let names: Vec<_> = everything
        .items()
        .iter()
        .map(|row| row.profile.display_name.as_str())
        .collect();
    assert_eq!(names, ["Cid", "Bea", "Ana"], "newest first");
    assert_eq!(
        (counts.total, counts.approved, counts.rejected),
        (3, 1, 1)
    );
    assert_eq!(
        counts.pending, 2,
        "dashboard pending counts complete unapproved profiles, rejected or not"
    );
    assert_eq!(counts.recently_created, 2);
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn public_search_only_sees_approved_visible_profiles(database: Option<TestDatabase>) {
    let Some(db) = database else { return };
    let repo = DieselCompanionProfileRepository::new(db.pool.clone());
    let admin = db.seed_user("Root", "root@example.com", UserType::Admin, at(1));
    let mut shown = complete_profile(&db, "Dora", "Lisbon", 2);
    let mut hidden = complete_profile(&db, "Eva", "Lisbon", 3);
    let unreviewed = complete_profile(&db, "Fay", "Lisbon", 4);
    shown.approve(admin.clone(), at(5));
    hidden.approve(admin, at(5));
    hidden.is_visible = false;

    let (lisbon, wildcard) = db.runtime.block_on(async {
        for profile in [&shown, &hidden, &unreviewed] {
            repo.save(profile).await.expect("insert");
        }
        let lisbon = PublicProfileSearch {
            query: None,
            city: SearchTerm::new("lis"),
        };
        let wildcard = PublicProfileSearch {
            query: SearchTerm::new("%"),
            city: None,
        };
        (
            repo.search_public(&lisbon, PageRequest::default())
                .await
                .expect("city search"),
            repo.search_public(&wildcard, PageRequest::default())
                .await
                .expect("wildcard search"),
        )
    });

    assert_eq!(lisbon.total_items(), 1);
    assert_eq!(lisbon.items()[0].display_name, "Dora");
    assert_eq!(wildcard.total_items(), 0, "LIKE metacharacters match literally");
}

#[rstest]
#[case("sOUSa", &["Mimi"])]
#[case("0%", &["100% Local"])]
#[case("coim", &["Mimi"])]
#[case("1000", &["1000 Steps"])]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn admin_search_matches_profile_owner_and_city(
    database: Option<TestDatabase>,
    #[case] term: &str,
    #[case] expected: &[&str],
) {
    let Some(db) = database else { return };
    let repo = DieselCompanionProfileRepository::new(db.pool.clone());
    let owner = db.seed_user(
        "Margarida Sousa",
        "margarida@example.com",
        UserType::Companion,
        at(1),
    );
    let mut nicknamed = CompanionProfile::draft(owner, "Mimi".to_owned(), at(1));
    nicknamed.location_city = Some("Coimbra".to_owned());
    let percent = complete_profile(&db, "100% Local", "Lisbon", 2);
    let digits = complete_profile(&db, "1000 Steps", "Porto", 3);

    let page = db.runtime.block_on(async {
        for profile in [&nicknamed, &percent, &digits] {
            repo.save(profile).await.expect("insert");
        }
        repo.list_for_admin(
            &ProfileListFilter::from_query(None, Some(term)),
            PageRequest::default(),
        )
        .await
        .expect("admin search")
    });

    let names: Vec<_> = page
        .items()
        .iter()
        .map(|row| row.profile.display_name.as_str())
        .collect();
    assert_eq!(names, expected);
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn second_profile_for_an_owner_is_a_conflict(database: Option<TestDatabase>) {
    let Some(db) = database else { return };
    let repo = DieselCompanionProfileRepository::new(db.pool.clone());
    let first = complete_profile(&db, "Rita", "Faro", 1);
    let duplicate = CompanionProfile::draft(first.user_id.clone(), "Rita again".to_owned(), at(2));

    let result = db.runtime.block_on(async {
        repo.save(&first).await.expect("insert");
        repo.save(&duplicate).await
    });

    assert!(matches!(
        result,
        Err(ProfilePersistenceError::Conflict { .. })
    ));
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn delete_reports_whether_a_row_matched(database: Option<TestDatabase>) {
    let Some(db) = database else { return };
    let repo = DieselCompanionProfileRepository::new(db.pool.clone());
    let profile = complete_profile(&db, "Gil", "Evora", 1);

    let (first, second) = db.runtime.block_on(async {
        repo.save(&profile).await.expect("insert");
        (
            repo.delete(&profile.id).await.expect("delete"),
            repo.delete(&profile.id).await.expect("delete again"),
        )
    });

    assert!(first);
    assert!(!second);
}

#[rstest]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn user_listing_filters_and_attaches_profile_summaries(database: Option<TestDatabase>) {
    let Some(db) = database else { return };
    let profiles = DieselCompanionProfileRepository::new(db.pool.clone());
    let users = DieselUserRepository::new(db.pool.clone());
    db.seed_user("Hal", "hal@example.com", UserType::Client, at(1));
    let profile = complete_profile(&db, "Ivy", "Sintra", 2);

    let (companions, by_email, counts) = db.runtime.block_on(async {
        profiles.save(&profile).await.expect("insert");
        (
            users
                .list(
                    &UserListFilter::from_query(Some("Companion"), None),
                    PageRequest::default(),
                )
                .await
                .expect("companions"),
            users
                .list(
                    &UserListFilter::from_query(None, Some("HAL@")),
                    PageRequest::default(),
                )
                .await
                .expect("search"),
            users.counts(at(2)).await.expect("counts"),
        )
    });

    assert_eq!(companions.total_items(), 1);
    let summary = companions.items()[0]
        .companion_profile
        .as_ref()
        .expect("profile summary");
    assert_eq!(summary.id, profile.id);
    assert_eq!(by_email.items()[0].user.name, "Hal");
    assert!(by_email.items()[0].companion_profile.is_none());
    assert_eq!(
        (counts.total, counts.companions, counts.clients, counts.recently_registered),
        (2, 1, 1, 1)
    );
}

#[rstest]
#[case("jo@example.com", SEED_PASSWORD, None)]
#[case("  JO@Example.com ", SEED_PASSWORD, None)]
#[case("jo@example.com", "wrong", Some(ErrorCode::Unauthorized))]
#[case("nobody@example.com", SEED_PASSWORD, Some(ErrorCode::Unauthorized))]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn login_checks_stored_hashes(
    database: Option<TestDatabase>,
    #[case] email: &str,
    #[case] password: &str,
    #[case] expected_error: Option<ErrorCode>,
) {
    let Some(db) = database else { return };
    let id = db.seed_user("Jo", "jo@example.com", UserType::Companion, at(1));
    let service = DieselLoginService::new(db.pool.clone());
    let credentials = LoginCredentials::try_from_parts(email, password).expect("credentials");

    let result = db
        .runtime
        .block_on(async { service.authenticate(&credentials).await });

    match expected_error {
        None => {
            let user = result.expect("login succeeds");
            assert_eq!(user.id, id);
            assert_eq!(user.user_type, UserType::Companion);
        }
        Some(code) => assert_eq!(result.expect_err("login fails").code(), code),
    }
}
