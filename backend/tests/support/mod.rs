//! Shared helpers for the embedded PostgreSQL integration suite.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! helpers live here and are pulled in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{drop_table, provision_database};

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// `postgres::Error`'s `Display` often collapses to `db error`; prefer the
/// SQLSTATE and server message when present.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}
