//! Dashboard and per-category history over a user's footprint records.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    FootprintHistoryQuery, FootprintRepository, FootprintRepositoryError, UserDirectory,
    map_user_directory_error,
};
use crate::domain::{
    Category, CategoryPoint, DASHBOARD_LIMIT, DashboardPoint, Error, FootprintRecord, UserId,
};

/// Service implementing [`FootprintHistoryQuery`].
///
/// A user without records is resolved against the directory: unknown users
/// are `not_found`, known users get an empty series.
#[derive(Clone)]
pub struct FootprintHistoryService<F, D> {
    footprints: Arc<F>,
    directory: Arc<D>,
}

impl<F, D> FootprintHistoryService<F, D> {
    pub fn new(footprints: Arc<F>, directory: Arc<D>) -> Self {
        Self {
            footprints,
            directory,
        }
    }
}

impl<F, D> FootprintHistoryService<F, D>
where
    F: FootprintRepository,
    D: UserDirectory,
{
    fn map_repository_error(error: FootprintRepositoryError) -> Error {
        match error {
            FootprintRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("footprint store unavailable: {message}"))
            }
            FootprintRepositoryError::Query { message } => {
                Error::internal(format!("footprint store error: {message}"))
            }
        }
    }

    async fn records_for(&self, user_id: UserId) -> Result<Vec<FootprintRecord>, Error> {
        let records = self
            .footprints
            .list_for_user(user_id)
            .await
            .map_err(Self::map_repository_error)?;
        if records.is_empty() {
            let known = self
                .directory
                .find_user(user_id)
                .await
                .map_err(map_user_directory_error)?;
            if known.is_none() {
                return Err(Error::not_found(format!("user {user_id} not found")));
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl<F, D> FootprintHistoryQuery for FootprintHistoryService<F, D>
where
    F: FootprintRepository,
    D: UserDirectory,
{
    async fn dashboard(&self, user_id: UserId) -> Result<Vec<DashboardPoint>, Error> {
        let mut records = self.records_for(user_id).await?;
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(records
            .iter()
            .take(DASHBOARD_LIMIT)
            .map(DashboardPoint::from)
            .collect())
    }

    async fn category_series(
        &self,
        user_id: UserId,
        category: Category,
    ) -> Result<Vec<CategoryPoint>, Error> {
        let mut records = self.records_for(user_id).await?;
        records.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(records
            .iter()
            .map(|record| CategoryPoint::from_record(category, record))
            .collect())
    }

    async fn list_footprints(&self) -> Result<Vec<FootprintRecord>, Error> {
        self.footprints
            .list_all()
            .await
            .map_err(Self::map_repository_error)
    }
}
