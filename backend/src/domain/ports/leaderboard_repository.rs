//! Port abstraction for reading leaderboard rows.

use async_trait::async_trait;

use crate::domain::LeaderboardEntry;

use super::define_port_error;

define_port_error! {
    /// Errors raised by leaderboard repository adapters.
    pub enum LeaderboardRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "leaderboard repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "leaderboard repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// Rows whose city matches exactly. Ordering is left to the caller.
    async fn list_for_city(
        &self,
        city: &str,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardRepositoryError>;
}
