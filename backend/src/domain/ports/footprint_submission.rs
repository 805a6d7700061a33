//! Driving port for submitting a daily footprint.
//!
//! HTTP handlers call [`FootprintSubmissionCommand`] with a validated
//! submission; the implementation coordinates the user directory and the
//! local ledger.

use async_trait::async_trait;

use crate::domain::{Error, FootprintSubmission, SubmissionReceipt};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FootprintSubmissionCommand: Send + Sync {
    /// Compute, credit and record a submission.
    ///
    /// # Errors
    ///
    /// - `not_found` when the directory does not know the user. Nothing is
    ///   persisted in that case.
    /// - `service_unavailable` when the directory or database is unreachable.
    async fn submit(&self, submission: FootprintSubmission) -> Result<SubmissionReceipt, Error>;
}
