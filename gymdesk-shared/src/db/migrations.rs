/// Database migration runner
///
/// Migrations live in `migrations/` at this crate's root and are embedded
/// at compile time via `sqlx::migrate!`. They run automatically at server
/// startup before the router is built.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("Database migrations complete");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
