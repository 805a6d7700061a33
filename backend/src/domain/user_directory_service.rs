//! User directory service: registration, lookup, replacement and credits.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CredentialHashError, CredentialHasher, UserDirectoryCommand, UserDirectoryQuery,
    UserPersistenceError, UserRepository,
};
use crate::domain::{Error, NewUser, Registration, Role, UserId, UserRecord, UserUpdate};

/// Service implementing [`UserDirectoryCommand`] and [`UserDirectoryQuery`].
#[derive(Clone)]
pub struct UserDirectoryService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserDirectoryService<R, H> {
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<R, H> UserDirectoryService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user store unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user store error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { email } => {
                Error::conflict(format!("email {email} is already registered"))
                    .with_details(json!({ "field": "email", "code": "duplicate_email" }))
            }
        }
    }

    fn map_hash_error(error: CredentialHashError) -> Error {
        Error::internal(error.to_string())
    }

    fn missing(user_id: UserId) -> Error {
        Error::not_found(format!("user {user_id} not found"))
    }
}

#[async_trait]
impl<R, H> UserDirectoryCommand for UserDirectoryService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    async fn register(&self, registration: Registration) -> Result<UserRecord, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(Self::map_hash_error)?;
        let new_user = NewUser {
            name: registration.name().to_owned(),
            email: registration.email().to_owned(),
            city: registration.city().to_owned(),
            password_hash,
            role: Role::User,
        };
        let record = self
            .users
            .insert(&new_user)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = %record.id, city = %record.city, "user registered");
        Ok(record)
    }

    async fn replace(&self, user_id: UserId, update: UserUpdate) -> Result<UserRecord, Error> {
        self.users
            .replace(user_id, &update)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Self::missing(user_id))
    }

    async fn credit(&self, user_id: UserId, delta: f64) -> Result<UserRecord, Error> {
        if !delta.is_finite() {
            return Err(Error::invalid_request("delta must be a finite number")
                .with_details(json!({ "field": "delta", "code": "non_finite" })));
        }
        let record = self
            .users
            .credit(user_id, delta)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Self::missing(user_id))?;
        info!(
            user_id = %user_id,
            delta,
            total = record.total_carbon_footprint,
            "user total credited"
        );
        Ok(record)
    }
}

#[async_trait]
impl<R, H> UserDirectoryQuery for UserDirectoryService<R, H>
where
    R: UserRepository,
    H: CredentialHasher,
{
    async fn list(&self) -> Result<Vec<UserRecord>, Error> {
        self.users.list().await.map_err(Self::map_persistence_error)
    }

    async fn find(&self, user_id: UserId) -> Result<UserRecord, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Self::missing(user_id))
    }
}
