//! Embedded PostgreSQL provisioning for the Diesel adapter suites.
//!
//! - Each test gets its own temporary database on the shared cluster.
//! - Schema setup runs the embedded Diesel migrations so tests never drift
//!   from `backend/migrations`.
//! - Table drops go through `postgres` rather than Diesel to simulate schema
//!   loss outside any pooled connection.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use postgres::{Client, NoTls};

use super::format_postgres_error;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Create a temporary database on the shared cluster and migrate it.
pub fn provision_database() -> Result<TemporaryDatabase, String> {
    let cluster = pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("shared cluster: {err:?}"))?;
    let database = cluster
        .create_temporary_database()
        .map_err(|err| format!("temporary database: {err:?}"))?;
    migrate_schema(database.url())?;
    Ok(database)
}

/// Run all pending migrations against `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migration: {err}"))?;
    Ok(())
}

/// Drop `table` and everything depending on it.
pub fn drop_table(url: &str, table: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("DROP TABLE IF EXISTS {table} CASCADE;"))
        .map_err(|err| format_postgres_error(&err))
}
