//! Port abstraction for the directory's own user persistence.
use async_trait::async_trait;

use crate::domain::{NewUser, UserId, UserRecord, UserUpdate};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already registered this email.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; the repository assigns the identifier.
    async fn insert(&self, user: &NewUser) -> Result<UserRecord, UserPersistenceError>;

    /// Every user, ordered by id.
    async fn list(&self) -> Result<Vec<UserRecord>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, UserPersistenceError>;

    /// Replace name and total. Returns `None` when the user does not exist.
    async fn replace(
        &self,
        id: UserId,
        update: &UserUpdate,
    ) -> Result<Option<UserRecord>, UserPersistenceError>;

    /// Atomically add `delta` to the total. Returns `None` for unknown users.
    async fn credit(
        &self,
        id: UserId,
        delta: f64,
    ) -> Result<Option<UserRecord>, UserPersistenceError>;
}
