//! Driving port for read-only projections over footprint records.

use async_trait::async_trait;

use crate::domain::{Category, CategoryPoint, DashboardPoint, Error, FootprintRecord, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FootprintHistoryQuery: Send + Sync {
    /// The most recent totals for a user, newest first.
    async fn dashboard(&self, user_id: UserId) -> Result<Vec<DashboardPoint>, Error>;

    /// One category across every record of a user, oldest first.
    async fn category_series(
        &self,
        user_id: UserId,
        category: Category,
    ) -> Result<Vec<CategoryPoint>, Error>;

    /// Every stored footprint record.
    async fn list_footprints(&self) -> Result<Vec<FootprintRecord>, Error>;
}
