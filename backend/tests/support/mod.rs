//! Shared helpers for integration suites that need embedded PostgreSQL.
//!
//! Integration tests compile as separate crates, so suites pull this module
//! in with `mod support;` rather than going through the library.

pub mod pg_embed;

/// Returns true when `SKIP_TEST_CLUSTER` is set to a truthy value.
///
/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip or fail a suite whose embedded cluster could not be prepared.
///
/// Returns `None` with a skip marker when `SKIP_TEST_CLUSTER` is truthy and
/// panics otherwise, so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
