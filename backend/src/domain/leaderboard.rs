//! Per-city leaderboard aggregates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{NewFootprint, UserId};

/// One user's running total within a city.
///
/// ## Invariants
/// - `total_carbon_footprint` equals the sum of that user's footprint totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[schema(value_type = i64, example = 42)]
    pub user_id: UserId,
    pub name: String,
    pub city: String,
    pub total_carbon_footprint: f64,
    /// Day of the most recent credit.
    #[schema(value_type = String, format = Date, example = "2026-10-01")]
    pub date: NaiveDate,
}

/// Increment applied to a user's leaderboard row.
///
/// The name and city seed the row on first submission; later credits only
/// add to the total and move the date forward.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardCredit {
    pub user_id: UserId,
    pub name: String,
    pub city: String,
    pub date: NaiveDate,
    pub amount: f64,
}

impl LeaderboardCredit {
    /// The row created by a user's first credit.
    pub fn into_entry(self) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id: self.user_id,
            name: self.name,
            city: self.city,
            total_carbon_footprint: self.amount,
            date: self.date,
        }
    }

    /// Add this credit to an existing row, keeping its name and city.
    pub fn apply_to(&self, entry: &mut LeaderboardEntry) {
        entry.total_carbon_footprint += self.amount;
        entry.date = entry.date.max(self.date);
    }
}

impl From<&NewFootprint> for LeaderboardCredit {
    fn from(value: &NewFootprint) -> Self {
        Self {
            user_id: value.user_id,
            name: value.name.clone(),
            city: value.city.clone(),
            date: value.date,
            amount: value.breakdown.total,
        }
    }
}

/// Order entries by total descending, then by user id.
pub fn rank(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        b.total_carbon_footprint
            .total_cmp(&a.total_carbon_footprint)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
}
