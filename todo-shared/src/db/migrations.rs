/// Schema migrations
///
/// Migration files live in `migrations/` at the workspace root and are
/// embedded into the binary at compile time. Running them is idempotent:
/// applied versions are recorded in `_sqlx_migrations`, and the SQL itself
/// uses `CREATE TABLE IF NOT EXISTS` so a database created by an earlier
/// deployment is adopted as-is.

use sqlx::{migrate::Migrator, postgres::PgPool};
use tracing::{info, warn};

/// Embedded migrations for the `users` and `tasks` tables
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Applies all pending migrations
///
/// # Errors
///
/// Returns an error if a migration fails to execute or if an applied
/// migration's checksum no longer matches the embedded file
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!(
        available = MIGRATOR.iter().count(),
        "Starting database migrations"
    );

    match MIGRATOR.run(pool).await {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_embedded_in_order() {
        let versions: Vec<i64> = MIGRATOR.iter().map(|m| m.version).collect();

        assert_eq!(versions.len(), 2);
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_migrations_create_both_tables() {
        let sql: String = MIGRATOR.iter().map(|m| m.sql.as_ref()).collect();

        assert!(sql.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS tasks"));
        assert!(sql.contains("ON DELETE CASCADE"));
    }
}
