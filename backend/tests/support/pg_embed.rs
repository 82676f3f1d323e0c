//! Embedded PostgreSQL bootstrap for the Diesel adapter suites.
//!
//! `pg-embed-setup-unpriv` installs into `/var/tmp` by default, which
//! sandboxed runners cannot write to. The bootstrap scopes `PG_RUNTIME_DIR`
//! and `PG_DATA_DIR` to a directory under `target/` and pins `PG_PASSWORD`
//! so a reused data directory keeps accepting the same credentials.

use std::path::PathBuf;
use std::time::Duration;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use qa_backend::outbound::persistence::MIGRATIONS;

const SHARED_CLUSTER_RETRIES: u32 = 3;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);
const STABLE_PASSWORD: &str = "qa_backend_embedded_test";

fn pg_embed_target_dir() -> PathBuf {
    if let Some(target_dir) = std::env::var_os("CARGO_TARGET_DIR") {
        return PathBuf::from(target_dir).join("pg-embed");
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("pg-embed")
}

fn bootstrap_overrides() -> Result<Vec<(&'static str, Option<String>)>, String> {
    let mut overrides = Vec::new();
    if std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none() {
        let base = pg_embed_target_dir().join(format!("shared-{}", std::process::id()));
        let runtime_dir = base.join("install");
        let data_dir = base.join("data");
        std::fs::create_dir_all(&runtime_dir).map_err(|err| err.to_string())?;
        std::fs::create_dir_all(&data_dir).map_err(|err| err.to_string())?;
        overrides.push((
            "PG_RUNTIME_DIR",
            Some(runtime_dir.to_string_lossy().into_owned()),
        ));
        overrides.push(("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())));
    }
    if std::env::var_os("PG_PASSWORD").is_none() {
        overrides.push(("PG_PASSWORD", Some(STABLE_PASSWORD.to_owned())));
    }
    Ok(overrides)
}

/// Returns the process-wide embedded cluster, starting it on first use.
///
/// Bootstrap failures are retried a few times since the first run downloads
/// PostgreSQL binaries and parallel suites race for them.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let overrides = bootstrap_overrides()?;
    let _env_guard = env_lock::lock_env(overrides);

    let mut attempt = 1;
    loop {
        match shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!(
                    "pg-embed: bootstrap attempt {attempt}/{SHARED_CLUSTER_RETRIES} failed: {err:?}"
                );
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY * attempt);
                attempt += 1;
            }
            Err(err) => return Err(format!("{err:?}")),
        }
    }
}

/// Creates a fresh database on `cluster` with every migration applied.
///
/// The returned guard drops the database when it goes out of scope.
pub fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let database = cluster
        .temporary_database(format!("qa_test_{}", uuid::Uuid::new_v4().simple()))
        .map_err(|err| format!("create database: {err:?}"))?;
    migrate_schema(&database.url().to_string())?;
    Ok(database)
}

fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}
