//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Profile, RegistrationDraft};

/// Domain use-case port for creating local accounts.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Validate the draft, create the account, and return its redacted
    /// profile.
    async fn register(&self, draft: RegistrationDraft) -> Result<Profile, Error>;
}
