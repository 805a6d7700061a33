//! City leaderboard queries.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LeaderboardQuery, LeaderboardRepository, LeaderboardRepositoryError};
use crate::domain::{Error, LeaderboardEntry, rank};

/// Service implementing [`LeaderboardQuery`].
#[derive(Clone)]
pub struct LeaderboardService<L> {
    leaderboard: Arc<L>,
}

impl<L> LeaderboardService<L> {
    pub fn new(leaderboard: Arc<L>) -> Self {
        Self { leaderboard }
    }
}

#[async_trait]
impl<L> LeaderboardQuery for LeaderboardService<L>
where
    L: LeaderboardRepository,
{
    async fn for_city(&self, city: &str) -> Result<Vec<LeaderboardEntry>, Error> {
        let mut entries = self
            .leaderboard
            .list_for_city(city)
            .await
            .map_err(|err| match err {
                LeaderboardRepositoryError::Connection { message } => {
                    Error::service_unavailable(format!("leaderboard unavailable: {message}"))
                }
                LeaderboardRepositoryError::Query { message } => {
                    Error::internal(format!("leaderboard error: {message}"))
                }
            })?;
        // A city with no participants cannot be told apart from an unknown one.
        if entries.is_empty() {
            return Err(Error::not_found(format!("city {city} not found")));
        }
        rank(&mut entries);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockLeaderboardRepository;
    use crate::domain::{ErrorCode, UserId};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn entry(id: i64, total: f64) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id: UserId::new(id).expect("valid id"),
            name: format!("user {id}"),
            city: "Pune".to_owned(),
            total_carbon_footprint: total,
            date: NaiveDate::from_ymd_opt(2026, 10, 2).expect("valid date"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn entries_are_ranked_by_total_descending() {
        let mut repo = MockLeaderboardRepository::new();
        repo.expect_list_for_city()
            .withf(|city| city == "Pune")
            .times(1)
            .return_once(|_| Ok(vec![entry(1, 3.0), entry(2, 12.0), entry(3, 7.5)]));

        let entries = LeaderboardService::new(Arc::new(repo))
            .for_city("Pune")
            .await
            .expect("leaderboard loads");

        let totals: Vec<f64> = entries.iter().map(|e| e.total_carbon_footprint).collect();
        assert_eq!(totals, vec![12.0, 7.5, 3.0]);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_city_is_not_found() {
        let mut repo = MockLeaderboardRepository::new();
        repo.expect_list_for_city().return_once(|_| Ok(Vec::new()));

        let error = LeaderboardService::new(Arc::new(repo))
            .for_city("Atlantis")
            .await
            .expect_err("no participants");

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "city Atlantis not found");
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_are_unavailable() {
        let mut repo = MockLeaderboardRepository::new();
        repo.expect_list_for_city()
            .return_once(|_| Err(LeaderboardRepositoryError::connection("refused")));

        let error = LeaderboardService::new(Arc::new(repo))
            .for_city("Pune")
            .await
            .expect_err("store down");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
