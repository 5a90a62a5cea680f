//! Opt-in and skip policy for the embedded cluster.

/// True when `RUN_PG_EMBEDDED=1`; the Diesel suites are `#[ignore]`d and
/// bail out early otherwise.
pub fn embedded_postgres_enabled() -> bool {
    std::env::var("RUN_PG_EMBEDDED").as_deref() == Ok("1")
}

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true", or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Prints a skip marker and returns `None` when `SKIP_TEST_CLUSTER` is set;
/// panics otherwise so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
