//! PostgreSQL-backed `SubmissionLedger`.
//!
//! The footprint insert and the leaderboard upsert share one transaction. The
//! upsert increments `leaderboard.total` inside SQL so concurrent submissions
//! for one user both land. Name and city are written only when the row is
//! created.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Date;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SubmissionLedger, SubmissionLedgerError};
use crate::domain::{FootprintRecord, LeaderboardCredit, NewFootprint};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FootprintRow, LeaderboardRow, NewFootprintRow};
use super::pool::DbPool;
use super::schema::{footprints, leaderboard};

diesel::define_sql_function! {
    /// PostgreSQL `GREATEST` over two dates.
    fn greatest(a: Date, b: Date) -> Date;
}

/// Diesel-backed implementation of the [`SubmissionLedger`] port.
#[derive(Clone)]
pub struct DieselSubmissionLedger {
    pool: DbPool,
}

impl DieselSubmissionLedger {
    /// Create a new ledger with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_footprint_row(footprint: &NewFootprint) -> NewFootprintRow<'_> {
    let breakdown = footprint.breakdown;
    NewFootprintRow {
        user_id: footprint.user_id.get(),
        name: &footprint.name,
        recorded_on: footprint.date,
        city: &footprint.city,
        transportation: breakdown.transportation,
        electricity: breakdown.electricity,
        waste: breakdown.waste,
        total: breakdown.total,
    }
}

fn to_leaderboard_row(credit: LeaderboardCredit) -> LeaderboardRow {
    LeaderboardRow {
        user_id: credit.user_id.get(),
        name: credit.name,
        recorded_on: credit.date,
        city: credit.city,
        total: credit.amount,
    }
}

#[async_trait]
impl SubmissionLedger for DieselSubmissionLedger {
    async fn record(
        &self,
        footprint: &NewFootprint,
    ) -> Result<FootprintRecord, SubmissionLedgerError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let footprint_row = to_footprint_row(footprint);
        let leaderboard_row = to_leaderboard_row(LeaderboardCredit::from(footprint));
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SubmissionLedgerError::connection))?;

        let inserted: FootprintRow = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let inserted = diesel::insert_into(footprints::table)
                        .values(&footprint_row)
                        .returning(FootprintRow::as_returning())
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(leaderboard::table)
                        .values(&leaderboard_row)
                        .on_conflict(leaderboard::user_id)
                        .do_update()
                        .set((
                            leaderboard::recorded_on.eq(greatest(
                                leaderboard::recorded_on,
                                excluded(leaderboard::recorded_on),
                            )),
                            leaderboard::total.eq(leaderboard::total + excluded(leaderboard::total)),
                        ))
                        .execute(conn)
                        .await?;

                    Ok(inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    SubmissionLedgerError::query,
                    SubmissionLedgerError::connection,
                )
            })?;

        FootprintRecord::try_from(inserted).map_err(SubmissionLedgerError::query)
    }
}
