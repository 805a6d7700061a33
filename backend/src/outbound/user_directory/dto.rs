//! Wire DTOs exchanged with the user-directory service.
//!
//! Responses are decoded into these first and validated into domain records
//! in one pass, so a malformed directory payload becomes a decode error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Role, UserId, UserRecord};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserRecordDto {
    pub(super) id: i64,
    pub(super) name: String,
    pub(super) email: String,
    pub(super) city: String,
    pub(super) total_carbon_footprint: f64,
    pub(super) role: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl UserRecordDto {
    pub(super) fn into_domain(self) -> Result<UserRecord, String> {
        let id = UserId::new(self.id).map_err(|err| format!("id {}: {err}", self.id))?;
        let role = Role::parse(&self.role).ok_or_else(|| format!("unknown role {}", self.role))?;
        if !self.total_carbon_footprint.is_finite() {
            return Err(format!("user {id} has a non-finite total"));
        }
        Ok(UserRecord {
            id,
            name: self.name,
            email: self.email,
            city: self.city,
            total_carbon_footprint: self.total_carbon_footprint,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CreditRequestDto {
    pub(super) delta: f64,
}
