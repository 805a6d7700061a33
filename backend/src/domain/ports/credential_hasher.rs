//! Port for turning plain-text passwords into storable credential hashes.

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hashing adapters.
    pub enum CredentialHashError {
        /// The hashing primitive failed.
        Hashing { message: String } => "credential hashing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash `password` into a self-describing string (algorithm, salt, digest).
    fn hash(&self, password: &str) -> Result<String, CredentialHashError>;
}
