//! Driving port for profile and credential mutations.

use async_trait::async_trait;

use crate::domain::{Error, PasswordChange, Profile, UserId};

/// Replacement field set for a profile update.
#[derive(Debug, Clone)]
pub struct ProfileUpdateRequest {
    /// New display name (raw; validated by the service).
    pub name: String,
    /// New email address (raw; validated by the service).
    pub email: String,
}

/// Domain use-case port for mutating the current user's account.
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Replace the account's display name and email.
    ///
    /// An email already used by a *different* account is a conflict;
    /// re-submitting the caller's own current email succeeds.
    async fn update_profile(
        &self,
        user_id: &UserId,
        request: ProfileUpdateRequest,
    ) -> Result<Profile, Error>;

    /// Replace the account's local password after verifying the current one.
    ///
    /// Accounts without a stored credential hash (federated-only) never
    /// accept this flow.
    async fn change_password(
        &self,
        user_id: &UserId,
        change: PasswordChange,
    ) -> Result<(), Error>;
}
