//! User profile queries answered through the remote directory.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserDirectory, UserProfileQuery, map_user_directory_error};
use crate::domain::{Error, UserId, UserProfile, UserRecord};

/// Service implementing [`UserProfileQuery`].
#[derive(Clone)]
pub struct UserProfileService<D> {
    directory: Arc<D>,
}

impl<D> UserProfileService<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D> UserProfileQuery for UserProfileService<D>
where
    D: UserDirectory,
{
    async fn profile(&self, user_id: UserId) -> Result<UserProfile, Error> {
        self.directory
            .find_user(user_id)
            .await
            .map_err(map_user_directory_error)?
            .map(UserProfile::from)
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        self.directory
            .list_users()
            .await
            .map_err(map_user_directory_error)
    }
}
