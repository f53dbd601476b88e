//! Driving port for profile reads.
//!
//! Inbound adapters use this port to load the authenticated account's
//! profile without importing persistence details. The profile is a redacted
//! view: the stored credential hash collapses to a `has_password` flag.

use async_trait::async_trait;

use crate::domain::{DisplayName, EmailAddress, Error, Profile, UserId};

/// Domain use-case port for reading the current user's profile.
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Return the redacted profile for the authenticated user.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Profile, Error>;
}

/// Stateless profile source for handler tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileQuery;

#[async_trait]
impl ProfileQuery for FixtureProfileQuery {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Profile, Error> {
        let display_name = DisplayName::new("Demo User")
            .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
        let email = EmailAddress::new("demo@example.com")
            .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;
        Ok(Profile {
            id: user_id.clone(),
            display_name,
            email,
            has_password: true,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_profile_query_returns_requested_user() {
        let query = FixtureProfileQuery;
        let user_id = UserId::new("11111111-1111-1111-1111-111111111111").expect("user id");

        let profile = query
            .fetch_profile(&user_id)
            .await
            .expect("profile response");
        assert_eq!(profile.id, user_id);
        assert_eq!(profile.email.as_ref(), "demo@example.com");
        assert!(profile.has_password);
    }
}
