//! Embedded PostgreSQL helpers shared by the persistence integration suites.
//!
//! Each test gets its own migrated database on a throwaway cluster. Suites are
//! `#[ignore]`d by default and only run with `RUN_PG_EMBEDDED=1`, since the
//! first run downloads PostgreSQL binaries.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use chrono::{DateTime, Utc};
use companion_backend::domain::{UserId, UserType};
use companion_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

/// Password stored for every seeded user.
pub const SEED_PASSWORD: &str = "correct horse battery";

/// True when the embedded suites were requested.
pub fn embedded_postgres_enabled() -> bool {
    if std::env::var("RUN_PG_EMBEDDED").as_deref() == Ok("1") {
        return true;
    }
    eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
    false
}

fn pg_embed_target_dir() -> PathBuf {
    if let Some(target_dir) = std::env::var_os("CARGO_TARGET_DIR") {
        return PathBuf::from(target_dir).join("pg-embed");
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("pg-embed")
}

fn is_transient_error(err: &str) -> bool {
    let err_lower = err.to_lowercase();
    [
        "connection reset",
        "connection refused",
        "timed out",
        "temporarily unavailable",
        "error decoding response body",
    ]
    .iter()
    .any(|pattern| err_lower.contains(pattern))
}

/// Start a cluster under the target directory, retrying transient download
/// failures.
fn start_cluster() -> Result<TestCluster, String> {
    let _bootstrap_guard = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let base = pg_embed_target_dir().join(format!("cluster-{}", Uuid::new_v4()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir).map_err(|err| err.to_string())?;
    std::fs::create_dir_all(&data_dir).map_err(|err| err.to_string())?;
    let _env_guard = env_lock::lock_env([
        ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
        ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
    ]);

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == MAX_RETRIES || !is_transient_error(&last_error) {
                    break;
                }
                std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS << attempt));
            }
        }
    }
    Err(last_error)
}

/// A migrated database on a private cluster.
pub struct TestDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
    url: String,
    _cluster: TestCluster,
}

impl TestDatabase {
    /// Start a cluster, create a fresh database, and apply migrations.
    pub fn start() -> Result<Self, String> {
        let cluster = start_cluster()?;
        let admin_url = cluster.connection().database_url("postgres");
        let name = format!("companions_{}", Uuid::new_v4().simple());
        let mut admin = Client::connect(&admin_url, NoTls).map_err(|err| err.to_string())?;
        admin
            .batch_execute(&format!("CREATE DATABASE \"{name}\""))
            .map_err(|err| err.to_string())?;
        let url = cluster.connection().database_url(&name);

        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let pool = runtime.block_on(async {
            run_pending_migrations(&url)
                .await
                .map_err(|err| err.to_string())?;
            DbPool::new(PoolConfig::new(url.as_str()).with_max_size(2))
                .await
                .map_err(|err| err.to_string())
        })?;

        Ok(Self {
            runtime,
            pool,
            url,
            _cluster: cluster,
        })
    }

    /// Insert a user row directly; returns the new id.
    pub fn seed_user(
        &self,
        name: &str,
        email: &str,
        user_type: UserType,
        created_at: DateTime<Utc>,
    ) -> UserId {
        let id = Uuid::new_v4();
        let salt = SaltString::encode_b64(b"companion-seed-salt").expect("valid salt");
        let hash = Argon2::default()
            .hash_password(SEED_PASSWORD.as_bytes(), &salt)
            .expect("hashing succeeds")
            .to_string();
        let mut client = Client::connect(&self.url, NoTls).expect("connect for seeding");
        client
            .execute(
                "INSERT INTO users (id, name, email, password_hash, user_type, phone, \
                 created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, ($7::text)::timestamptz, \
                 ($7::text)::timestamptz)",
                &[
                    &id,
                    &name,
                    &email,
                    &hash,
                    &user_type.as_str(),
                    &"+351 900 000 000",
                    &created_at.to_rfc3339(),
                ],
            )
            .expect("insert user");
        UserId::from_uuid(id)
    }
}
