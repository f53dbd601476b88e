//! Port for the password-hashing primitive.
//!
//! The hashing algorithm is an external collaborator: the domain only moves
//! opaque encoded hashes between this port and the user repository. The
//! production adapter wraps argon2; tests use the deterministic fixture.

use crate::domain::CredentialHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing or verification failed inside the primitive.
        Hash { message: String } => "password hashing failed: {message}",
    }
}

/// Port wrapping the password-hashing primitive.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext secret into an encoded credential hash.
    fn hash(&self, secret: &str) -> Result<CredentialHash, PasswordHashError>;

    /// Verify a plaintext secret against a stored hash.
    ///
    /// Returns `Ok(false)` for a well-formed hash that does not match;
    /// errors are reserved for malformed hashes or primitive failures.
    fn verify(&self, secret: &str, hash: &CredentialHash) -> Result<bool, PasswordHashError>;
}

/// Deterministic hasher for tests; never use outside the test harness.
///
/// Encodes the secret reversibly so expectations stay readable in fixtures.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

const FIXTURE_PREFIX: &str = "fixture$";

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, secret: &str) -> Result<CredentialHash, PasswordHashError> {
        Ok(CredentialHash::new(format!("{FIXTURE_PREFIX}{secret}")))
    }

    fn verify(&self, secret: &str, hash: &CredentialHash) -> Result<bool, PasswordHashError> {
        match hash.as_ref().strip_prefix(FIXTURE_PREFIX) {
            Some(stored) => Ok(stored == secret),
            None => Err(PasswordHashError::hash("unrecognized fixture hash")),
        }
    }
}
