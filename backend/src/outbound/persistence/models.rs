//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain records live here
//! so every adapter rejects malformed rows the same way.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::domain::{FootprintRecord, LeaderboardEntry, Role, UserId, UserRecord};

use super::schema::{footprints, leaderboard, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub city: String,
    pub total: f64,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = UserId::new(row.id).map_err(|err| format!("users.id {}: {err}", row.id))?;
        let role = Role::parse(&row.role)
            .ok_or_else(|| format!("users.role {} is not a known role", row.role))?;
        Ok(Self {
            id,
            name: row.name,
            email: row.email,
            city: row.city,
            total_carbon_footprint: row.total,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable struct for registering users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub city: &'a str,
    pub total: f64,
    pub role: &'a str,
}

/// Row struct for reading from the footprints table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = footprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FootprintRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub recorded_on: NaiveDate,
    pub city: String,
    pub transportation: f64,
    pub electricity: f64,
    pub waste: f64,
    pub total: f64,
}

impl TryFrom<FootprintRow> for FootprintRecord {
    type Error = String;

    fn try_from(row: FootprintRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id)
            .map_err(|err| format!("footprints.user_id {}: {err}", row.user_id))?;
        Ok(Self {
            id: row.id,
            user_id,
            name: row.name,
            date: row.recorded_on,
            city: row.city,
            transportation: row.transportation,
            electricity: row.electricity,
            waste: row.waste,
            total: row.total,
        })
    }
}

/// Insertable struct for appending footprint records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = footprints)]
pub(crate) struct NewFootprintRow<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub recorded_on: NaiveDate,
    pub city: &'a str,
    pub transportation: f64,
    pub electricity: f64,
    pub waste: f64,
    pub total: f64,
}

/// Row struct for reading and upserting the leaderboard table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = leaderboard)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LeaderboardRow {
    pub user_id: i64,
    pub name: String,
    pub recorded_on: NaiveDate,
    pub city: String,
    pub total: f64,
}

impl TryFrom<LeaderboardRow> for LeaderboardEntry {
    type Error = String;

    fn try_from(row: LeaderboardRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id)
            .map_err(|err| format!("leaderboard.user_id {}: {err}", row.user_id))?;
        Ok(Self {
            user_id,
            name: row.name,
            city: row.city,
            total_carbon_footprint: row.total,
            date: row.recorded_on,
        })
    }
}
