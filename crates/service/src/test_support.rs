#![cfg(test)]
use migration::MigratorTrait;
use models::db::connect;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Migrate once, then hand out a fresh connection per test. Errors are
/// returned (not panicked) so tests can skip when no database is up.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    MIGRATED
        .get_or_try_init(|| async {
            let db = connect().await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;
    connect().await
}
