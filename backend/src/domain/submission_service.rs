//! Footprint submission orchestration.
//!
//! A submission touches two systems: the remote user directory (running
//! total) and the local ledger (footprint record plus leaderboard credit).
//! The directory is credited first with an atomic increment. If the local
//! write then fails, a compensating negative credit is sent so the user's
//! total does not drift from their recorded footprints.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{
    FootprintSubmissionCommand, SubmissionLedger, SubmissionLedgerError, UserDirectory,
    map_user_directory_error,
};
use crate::domain::{Error, FootprintSubmission, NewFootprint, SubmissionReceipt, UserId};

/// Service implementing [`FootprintSubmissionCommand`].
#[derive(Clone)]
pub struct FootprintSubmissionService<D, L> {
    directory: Arc<D>,
    ledger: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<D, L> FootprintSubmissionService<D, L> {
    /// Create a new service. The clock supplies the default submission date.
    pub fn new(directory: Arc<D>, ledger: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            directory,
            ledger,
            clock,
        }
    }
}

impl<D, L> FootprintSubmissionService<D, L>
where
    D: UserDirectory,
    L: SubmissionLedger,
{
    fn map_ledger_error(error: SubmissionLedgerError) -> Error {
        match error {
            SubmissionLedgerError::Connection { message } => {
                Error::service_unavailable(format!("footprint store unavailable: {message}"))
            }
            SubmissionLedgerError::Query { message } => {
                Error::internal(format!("footprint store error: {message}"))
            }
        }
    }

    async fn compensate(&self, user_id: UserId, amount: f64) {
        match self.directory.credit_total(user_id, -amount).await {
            Ok(_) => warn!(
                user_id = %user_id,
                amount,
                "reverted directory credit after local write failed"
            ),
            Err(err) => error!(
                user_id = %user_id,
                amount,
                error = %err,
                "failed to revert directory credit; user total needs manual correction"
            ),
        }
    }
}

#[async_trait]
impl<D, L> FootprintSubmissionCommand for FootprintSubmissionService<D, L>
where
    D: UserDirectory,
    L: SubmissionLedger,
{
    async fn submit(&self, submission: FootprintSubmission) -> Result<SubmissionReceipt, Error> {
        let breakdown = submission
            .emissions()
            .ensure_finite()
            .map_err(|err| {
                Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": err.field(), "code": err.code() }))
            })?;
        let user_id = submission.user_id();

        let user = self
            .directory
            .find_user(user_id)
            .await
            .map_err(map_user_directory_error)?;
        if user.is_none() {
            return Err(Error::not_found(format!("user {user_id} not found")));
        }

        let footprint = NewFootprint {
            user_id,
            name: submission.name().to_owned(),
            date: submission
                .date()
                .unwrap_or_else(|| self.clock.utc().date_naive()),
            city: submission.city().to_owned(),
            breakdown,
        };

        self.directory
            .credit_total(user_id, breakdown.total)
            .await
            .map_err(map_user_directory_error)?;

        match self.ledger.record(&footprint).await {
            Ok(record) => {
                info!(
                    user_id = %user_id,
                    city = %footprint.city,
                    footprint_id = record.id,
                    total = breakdown.total,
                    "footprint submitted"
                );
                Ok(SubmissionReceipt {
                    footprint_id: record.id,
                    breakdown,
                })
            }
            Err(err) => {
                self.compensate(user_id, breakdown.total).await;
                Err(Self::map_ledger_error(err))
            }
        }
    }
}

#[cfg(test)]
#[path = "submission_service_tests.rs"]
mod tests;
