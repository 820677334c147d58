//! `PostgreSQL` connection pooling and embedded schema migrations.
//!
//! Migration SQL lives under `migrations/` in the Diesel CLI layout so the
//! same files serve `diesel migration run` and [`apply_migrations`].

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by every repository adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Ordered schema migrations as `(name, up.sql)` pairs.
pub const MIGRATIONS: &[(&str, &str)] = &[
    (
        "2026-10-01-000000_create_processes",
        include_str!("../migrations/2026-10-01-000000_create_processes/up.sql"),
    ),
    (
        "2026-10-01-000001_create_scripts",
        include_str!("../migrations/2026-10-01-000001_create_scripts/up.sql"),
    ),
    (
        "2026-10-02-000000_create_list_canceled",
        include_str!("../migrations/2026-10-02-000000_create_list_canceled/up.sql"),
    ),
];

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseSetupError {
    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),

    /// A pooled connection could not be checked out.
    #[error("failed to obtain a pooled connection: {0}")]
    Connection(#[source] PoolError),

    /// A migration script failed.
    #[error("migration {name} failed: {source}")]
    Migration {
        /// Name of the failing migration.
        name: &'static str,
        /// Underlying database error.
        #[source]
        source: diesel::result::Error,
    },
}

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`DatabaseSetupError::Pool`] when the pool cannot open its
/// initial connections.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, DatabaseSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().max_size(max_size).build(manager)?;
    Ok(pool)
}

/// Applies every embedded migration in order.
///
/// Migrations use `IF NOT EXISTS` guards, so reapplying them to an
/// up-to-date schema is a no-op.
///
/// # Errors
///
/// Returns [`DatabaseSetupError::Migration`] naming the first migration that
/// failed.
pub fn apply_migrations(connection: &mut PgConnection) -> Result<(), DatabaseSetupError> {
    for &(name, sql) in MIGRATIONS {
        connection
            .batch_execute(sql)
            .map_err(|source| DatabaseSetupError::Migration { name, source })?;
        tracing::debug!(migration = name, "applied migration");
    }
    Ok(())
}

/// Checks out a pooled connection and applies every embedded migration.
///
/// This blocks the calling thread; async callers should wrap it in
/// `spawn_blocking`.
///
/// # Errors
///
/// Returns [`DatabaseSetupError`] when no connection is available or a
/// migration fails.
pub fn migrate_pool(pool: &PgPool) -> Result<(), DatabaseSetupError> {
    let mut connection = pool.get().map_err(DatabaseSetupError::Connection)?;
    apply_migrations(&mut connection)
}
