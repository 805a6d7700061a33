//! Argon2id implementation of the `CredentialHasher` port.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};

use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Hashes passwords into PHC strings with a fresh random salt.
#[derive(Default)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialHashError::hashing(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Hash format coverage.
    use argon2::password_hash::{PasswordHash, PasswordVerifier};
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn hashes_verify_and_never_contain_the_password() {
        let hasher = Argon2CredentialHasher::new();
        let hash = hasher.hash("open sesame").expect("hashes");

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("open sesame"));
        let parsed = PasswordHash::new(&hash).expect("PHC string");
        assert!(
            Argon2::default()
                .verify_password(b"open sesame", &parsed)
                .is_ok()
        );
    }

    #[rstest]
    fn salts_differ_between_calls() {
        let hasher = Argon2CredentialHasher::new();
        assert_ne!(
            hasher.hash("open sesame").expect("first"),
            hasher.hash("open sesame").expect("second")
        );
    }
}
