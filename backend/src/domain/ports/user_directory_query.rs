//! Driving port for reading the user directory.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserRecord};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryQuery: Send + Sync {
    /// Every registered user, ordered by id.
    async fn list(&self) -> Result<Vec<UserRecord>, Error>;

    /// One user; unknown ids are `not_found`.
    async fn find(&self, user_id: UserId) -> Result<UserRecord, Error>;
}
