//! Driving port for user profile queries served by the tracker.
//!
//! Inbound adapters use this port to read directory data without knowing
//! that it lives behind a remote service.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserProfile, UserRecord};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Public profile for one user.
    async fn profile(&self, user_id: UserId) -> Result<UserProfile, Error>;

    /// Every user known to the directory.
    async fn list_users(&self) -> Result<Vec<UserRecord>, Error>;
}
