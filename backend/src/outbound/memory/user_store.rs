//! User directory held in memory.
//!
//! Implements both the directory's [`UserRepository`] and the tracker's
//! [`UserDirectory`] so a single process can run without the remote service.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{UserDirectory, UserDirectoryError, UserPersistenceError, UserRepository};
use crate::domain::{NewUser, UserId, UserRecord, UserUpdate};

struct StoredUser {
    record: UserRecord,
    #[expect(dead_code, reason = "no login flow reads credentials back")]
    password_hash: String,
}

#[derive(Default)]
struct UserState {
    next_id: i64,
    users: BTreeMap<UserId, StoredUser>,
}

/// In-memory users keyed by identifier.
pub struct InMemoryUserStore {
    state: Mutex<UserState>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryUserStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(UserState::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserState>, String> {
        self.state
            .lock()
            .map_err(|_| "user store lock poisoned".to_owned())
    }

    fn update<F>(&self, id: UserId, apply: F) -> Result<Option<UserRecord>, String>
    where
        F: FnOnce(&mut UserRecord),
    {
        let now = self.clock.utc();
        let mut state = self.lock()?;
        Ok(state.users.get_mut(&id).map(|stored| {
            apply(&mut stored.record);
            stored.record.updated_at = now;
            stored.record.clone()
        }))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn insert(&self, user: &NewUser) -> Result<UserRecord, UserPersistenceError> {
        let now = self.clock.utc();
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if state
            .users
            .values()
            .any(|stored| stored.record.email == user.email)
        {
            return Err(UserPersistenceError::duplicate_email(user.email.as_str()));
        }
        state.next_id += 1;
        let id = UserId::new(state.next_id).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let record = UserRecord {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            city: user.city.clone(),
            total_carbon_footprint: 0.0,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(
            id,
            StoredUser {
                record: record.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<UserRecord>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .values()
            .map(|stored| stored.record.clone())
            .collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.get(&id).map(|stored| stored.record.clone()))
    }

    async fn replace(
        &self,
        id: UserId,
        update: &UserUpdate,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        self.update(id, |record| {
            record.name = update.name().to_owned();
            record.total_carbon_footprint = update.total_carbon_footprint();
        })
        .map_err(UserPersistenceError::query)
    }

    async fn credit(
        &self,
        id: UserId,
        delta: f64,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        let now = self.clock.utc();
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        let Some(stored) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        let total = stored.record.total_carbon_footprint + delta;
        if !total.is_finite() {
            return Err(UserPersistenceError::query(format!(
                "crediting {delta} to user {id} would overflow the total"
            )));
        }
        stored.record.total_carbon_footprint = total;
        stored.record.updated_at = now;
        Ok(Some(stored.record.clone()))
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserStore {
    async fn find_user(&self, user_id: UserId) -> Result<Option<UserRecord>, UserDirectoryError> {
        self.find_by_id(user_id)
            .await
            .map_err(|err| UserDirectoryError::internal(err.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, UserDirectoryError> {
        self.list()
            .await
            .map_err(|err| UserDirectoryError::internal(err.to_string()))
    }

    async fn credit_total(
        &self,
        user_id: UserId,
        delta: f64,
    ) -> Result<UserRecord, UserDirectoryError> {
        if !delta.is_finite() {
            return Err(UserDirectoryError::rejected(format!(
                "credit for user {user_id} must be finite, got {delta}"
            )));
        }
        self.credit(user_id, delta)
            .await
            .map_err(|err| UserDirectoryError::internal(err.to_string()))?
            .ok_or_else(|| UserDirectoryError::not_found(user_id.get()))
    }
}
