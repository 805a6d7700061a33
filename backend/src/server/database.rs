//! Database start-up: apply migrations, then open the pool.

use tracing::info;

use crate::outbound::persistence::{
    DbPool, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};

/// Failures while preparing the database at start-up.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseStartupError {
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Apply pending migrations and build the connection pool.
///
/// # Errors
///
/// Returns [`DatabaseStartupError`] when migrations fail or the pool cannot
/// be built.
pub async fn prepare_database(config: PoolConfig) -> Result<DbPool, DatabaseStartupError> {
    let applied = run_pending_migrations(config.database_url()).await?;
    info!(applied, "database migrations complete");
    Ok(DbPool::new(config).await?)
}
