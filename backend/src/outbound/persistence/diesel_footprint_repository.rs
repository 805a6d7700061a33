//! PostgreSQL-backed read adapters for footprint history and leaderboards.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    FootprintRepository, FootprintRepositoryError, LeaderboardRepository,
    LeaderboardRepositoryError,
};
use crate::domain::{FootprintRecord, LeaderboardEntry, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FootprintRow, LeaderboardRow};
use super::pool::DbPool;
use super::schema::{footprints, leaderboard};

/// Diesel-backed implementation of the [`FootprintRepository`] port.
#[derive(Clone)]
pub struct DieselFootprintRepository {
    pool: DbPool,
}

impl DieselFootprintRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(
        &self,
        user_id: Option<UserId>,
    ) -> Result<Vec<FootprintRecord>, FootprintRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FootprintRepositoryError::connection))?;

        let mut query = footprints::table
            .select(FootprintRow::as_select())
            .order((footprints::recorded_on.asc(), footprints::id.asc()))
            .into_boxed();
        if let Some(user_id) = user_id {
            query = query.filter(footprints::user_id.eq(user_id.get()));
        }

        let rows: Vec<FootprintRow> = query.load(&mut conn).await.map_err(|err| {
            map_diesel_error(
                err,
                FootprintRepositoryError::query,
                FootprintRepositoryError::connection,
            )
        })?;
        rows.into_iter()
            .map(|row| FootprintRecord::try_from(row).map_err(FootprintRepositoryError::query))
            .collect()
    }
}

#[async_trait]
impl FootprintRepository for DieselFootprintRepository {
    async fn list_all(&self) -> Result<Vec<FootprintRecord>, FootprintRepositoryError> {
        self.load(None).await
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FootprintRecord>, FootprintRepositoryError> {
        self.load(Some(user_id)).await
    }
}

/// Diesel-backed implementation of the [`LeaderboardRepository`] port.
#[derive(Clone)]
pub struct DieselLeaderboardRepository {
    pool: DbPool,
}

impl DieselLeaderboardRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaderboardRepository for DieselLeaderboardRepository {
    async fn list_for_city(
        &self,
        city: &str,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, LeaderboardRepositoryError::connection))?;

        let rows: Vec<LeaderboardRow> = leaderboard::table
            .filter(leaderboard::city.eq(city))
            .select(LeaderboardRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    LeaderboardRepositoryError::query,
                    LeaderboardRepositoryError::connection,
                )
            })?;
        rows.into_iter()
            .map(|row| LeaderboardEntry::try_from(row).map_err(LeaderboardRepositoryError::query))
            .collect()
    }
}
