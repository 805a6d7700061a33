//! Port for recording a footprint together with its leaderboard credit.

use async_trait::async_trait;

use crate::domain::{FootprintRecord, NewFootprint};

use super::define_port_error;

define_port_error! {
    /// Errors raised while recording a submission locally.
    pub enum SubmissionLedgerError {
        /// Ledger connection could not be established.
        Connection { message: String } => "submission ledger connection failed: {message}",
        /// The write failed; nothing was recorded.
        Query { message: String } => "submission ledger write failed: {message}",
    }
}

/// Atomic local write for a submission.
///
/// Implementations insert the footprint record and credit the user's
/// leaderboard row (creating it on first use) as one unit. Either both writes
/// are visible afterwards or neither is.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionLedger: Send + Sync {
    /// Persist the footprint and credit the leaderboard by its total.
    async fn record(&self, footprint: &NewFootprint)
    -> Result<FootprintRecord, SubmissionLedgerError>;
}
