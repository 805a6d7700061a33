//! Port for the remote user directory consumed by the tracker.
//!
//! The tracker never touches the directory's storage. Production wires an
//! HTTP client behind this port; tests use the in-memory directory.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// The directory has no user with this identifier.
        NotFound { user_id: i64 } => "user {user_id} not found in directory",
        /// The directory could not be reached, timed out or failed server-side.
        Unavailable { message: String } => "user directory unavailable: {message}",
        /// The directory rejected the request.
        Rejected { message: String } => "user directory rejected request: {message}",
        /// The directory answered with a payload that could not be decoded.
        Decode { message: String } => "user directory response invalid: {message}",
        /// The directory failed internally; retrying will not help.
        Internal { message: String } => "user directory failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up one user. Unknown users yield `Ok(None)`.
    async fn find_user(&self, user_id: UserId) -> Result<Option<UserRecord>, UserDirectoryError>;

    /// Every user known to the directory.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UserDirectoryError>;

    /// Atomically add `delta` to the user's cumulative total.
    ///
    /// Unknown users yield [`UserDirectoryError::NotFound`].
    async fn credit_total(
        &self,
        user_id: UserId,
        delta: f64,
    ) -> Result<UserRecord, UserDirectoryError>;
}

/// Map directory failures onto domain errors.
///
/// A missing user is `not_found`; an unreachable directory is
/// `service_unavailable`. Anything else is an internal fault.
pub(crate) fn map_user_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::NotFound { user_id } => {
            Error::not_found(format!("user {user_id} not found"))
        }
        UserDirectoryError::Unavailable { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Rejected { message } => {
            Error::internal(format!("user directory rejected request: {message}"))
        }
        UserDirectoryError::Decode { message } => {
            Error::internal(format!("user directory response invalid: {message}"))
        }
        UserDirectoryError::Internal { message } => {
            Error::internal(format!("user directory failed: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserDirectoryError::not_found(4_i64), ErrorCode::NotFound)]
    #[case(UserDirectoryError::unavailable("timed out"), ErrorCode::ServiceUnavailable)]
    #[case(UserDirectoryError::rejected("400 Bad Request"), ErrorCode::InternalError)]
    #[case(UserDirectoryError::decode("missing field `id`"), ErrorCode::InternalError)]
    #[case(UserDirectoryError::internal("user store lock poisoned"), ErrorCode::InternalError)]
    fn directory_errors_map_to_distinct_codes(
        #[case] error: UserDirectoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_user_directory_error(error).code(), expected);
    }

    #[rstest]
    fn not_found_names_the_user() {
        let error = map_user_directory_error(UserDirectoryError::not_found(4_i64));
        assert_eq!(error.message(), "user 4 not found");
    }
}
