//! Driving port for city leaderboards.

use async_trait::async_trait;

use crate::domain::{Error, LeaderboardEntry};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardQuery: Send + Sync {
    /// Entries for `city`, highest total first. Empty cities are `not_found`.
    async fn for_city(&self, city: &str) -> Result<Vec<LeaderboardEntry>, Error>;
}
