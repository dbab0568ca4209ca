/// Database migration runner
///
/// Applies the SQL migrations embedded from the `migrations/` directory at
/// the crate root. Run once at startup, before any store is constructed.
///
/// # Migration Files
///
/// Each migration is a `{version}_{name}.sql` file applied in version
/// order; sqlx records applied versions in `_sqlx_migrations`.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration file is malformed, a migration fails to
/// execute, or the connection is lost mid-run.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
