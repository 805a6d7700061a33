//! Port abstraction for reading stored footprint records.

use async_trait::async_trait;

use crate::domain::{FootprintRecord, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by footprint repository adapters.
    pub enum FootprintRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "footprint repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "footprint repository query failed: {message}",
    }
}

/// Read access to footprint records.
///
/// Writes go through [`super::SubmissionLedger`] so the leaderboard credit
/// lands in the same transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FootprintRepository: Send + Sync {
    /// Every stored record, ordered by id.
    async fn list_all(&self) -> Result<Vec<FootprintRecord>, FootprintRepositoryError>;

    /// Records for one user, ordered by date ascending then id.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FootprintRecord>, FootprintRepositoryError>;
}
