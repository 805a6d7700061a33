//! Driving port for mutating the user directory.

use async_trait::async_trait;

use crate::domain::{Error, Registration, UserId, UserRecord, UserUpdate};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryCommand: Send + Sync {
    /// Register a new user with role `user` and a zero total.
    ///
    /// # Errors
    ///
    /// `conflict` when the email is already registered.
    async fn register(&self, registration: Registration) -> Result<UserRecord, Error>;

    /// Replace a user's name and total.
    async fn replace(&self, user_id: UserId, update: UserUpdate) -> Result<UserRecord, Error>;

    /// Atomically add `delta` to a user's total.
    async fn credit(&self, user_id: UserId, delta: f64) -> Result<UserRecord, Error>;
}
