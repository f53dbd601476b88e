//! Argon2-backed password hashing adapter.
//!
//! Implements the domain's `PasswordHasher` port with argon2id in its
//! default configuration. The domain never sees the algorithm; it moves
//! opaque PHC-format strings between this adapter and the user repository.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
};

use crate::domain::CredentialHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id implementation of the `PasswordHasher` port.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, secret: &str) -> Result<CredentialHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(CredentialHash::new(hash.to_string()))
    }

    fn verify(&self, secret: &str, hash: &CredentialHash) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(hash.as_ref())
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("password123").expect("hash");

        assert!(hash.as_ref().starts_with("$argon2"));
        assert!(hasher.verify("password123", &hash).expect("verify"));
        assert!(!hasher.verify("wrong", &hash).expect("verify"));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash("password123").expect("hash");
        let second = hasher.hash("password123").expect("hash");
        assert_ne!(first.as_ref(), second.as_ref());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let hasher = Argon2PasswordHasher;
        let corrupt = CredentialHash::new("not-a-phc-string");
        assert!(hasher.verify("password123", &corrupt).is_err());
    }
}
