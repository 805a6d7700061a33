//! Footprint history, leaderboard and submission ledger held in memory.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    FootprintRepository, FootprintRepositoryError, LeaderboardRepository,
    LeaderboardRepositoryError, SubmissionLedger, SubmissionLedgerError,
};
use crate::domain::{FootprintRecord, LeaderboardCredit, LeaderboardEntry, NewFootprint, UserId};

#[derive(Default)]
struct CarbonState {
    next_id: i64,
    footprints: Vec<FootprintRecord>,
    leaderboard: BTreeMap<UserId, LeaderboardEntry>,
}

/// Shared in-memory store implementing the tracker's driven ports.
#[derive(Default)]
pub struct InMemoryCarbonStore {
    state: Mutex<CarbonState>,
}

impl InMemoryCarbonStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, CarbonState>, String> {
        self.state
            .lock()
            .map_err(|_| "carbon store lock poisoned".to_owned())
    }
}

fn apply_credit(leaderboard: &mut BTreeMap<UserId, LeaderboardEntry>, credit: LeaderboardCredit) {
    match leaderboard.get_mut(&credit.user_id) {
        Some(entry) => credit.apply_to(entry),
        None => {
            leaderboard.insert(credit.user_id, credit.into_entry());
        }
    }
}

#[async_trait]
impl SubmissionLedger for InMemoryCarbonStore {
    async fn record(
        &self,
        footprint: &NewFootprint,
    ) -> Result<FootprintRecord, SubmissionLedgerError> {
        let mut state = self.lock().map_err(SubmissionLedgerError::query)?;
        state.next_id += 1;
        let breakdown = footprint.breakdown;
        let record = FootprintRecord {
            id: state.next_id,
            user_id: footprint.user_id,
            name: footprint.name.clone(),
            date: footprint.date,
            city: footprint.city.clone(),
            transportation: breakdown.transportation,
            electricity: breakdown.electricity,
            waste: breakdown.waste,
            total: breakdown.total,
        };
        state.footprints.push(record.clone());
        apply_credit(&mut state.leaderboard, LeaderboardCredit::from(footprint));
        Ok(record)
    }
}

#[async_trait]
impl FootprintRepository for InMemoryCarbonStore {
    async fn list_all(&self) -> Result<Vec<FootprintRecord>, FootprintRepositoryError> {
        let state = self.lock().map_err(FootprintRepositoryError::query)?;
        Ok(state.footprints.clone())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<FootprintRecord>, FootprintRepositoryError> {
        let state = self.lock().map_err(FootprintRepositoryError::query)?;
        Ok(state
            .footprints
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LeaderboardRepository for InMemoryCarbonStore {
    async fn list_for_city(
        &self,
        city: &str,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardRepositoryError> {
        let state = self.lock().map_err(LeaderboardRepositoryError::query)?;
        Ok(state
            .leaderboard
            .values()
            .filter(|entry| entry.city == city)
            .cloned()
            .collect())
    }
}
