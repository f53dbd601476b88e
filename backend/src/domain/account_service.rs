//! Account domain services: registration, login, profile, credentials.
//!
//! This module implements the account-facing driving ports on top of the
//! user repository and the password-hashing port. Stored credential hashes
//! never leave the service; callers only ever see the redacted [`Profile`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, ProfileCommand, ProfileQuery,
    ProfileUpdateRequest, RegistrationService, UserRepository, UserRepositoryError,
};
use crate::domain::{
    DisplayName, EmailAddress, Error, FieldViolation, LoginCredentials, PasswordChange, Profile,
    RegistrationDraft, User, UserId, UserValidationError,
};

/// Account service implementing the account-facing driving ports.
#[derive(Clone)]
pub struct AccountService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn email_taken_error() -> Error {
    Error::conflict("email already in use").with_details(json!({
        "field": "email",
        "code": "email_taken",
    }))
}

fn validation_error(violations: Vec<FieldViolation>) -> Error {
    Error::invalid_request("profile payload failed validation")
        .with_details(json!({ "violations": violations }))
}

fn name_violation(error: &UserValidationError) -> FieldViolation {
    match error {
        UserValidationError::EmptyDisplayName => FieldViolation::empty("name"),
        other => FieldViolation::malformed("name", other.to_string()),
    }
}

fn email_violation(error: &UserValidationError) -> FieldViolation {
    match error {
        UserValidationError::EmptyEmail => FieldViolation::empty("email"),
        other => FieldViolation::malformed("email", other.to_string()),
    }
}

impl<R, H> AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    fn map_repository_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserRepositoryError::EmailTaken => email_taken_error(),
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        let PasswordHashError::Hash { message } = error;
        Error::internal(format!("password hashing failed: {message}"))
    }

    fn parse_profile_fields(
        name: &str,
        email: &str,
    ) -> Result<(DisplayName, EmailAddress), Vec<FieldViolation>> {
        let mut violations = Vec::new();
        let display_name = DisplayName::new(name)
            .map_err(|err| violations.push(name_violation(&err)))
            .ok();
        let email = EmailAddress::new(email)
            .map_err(|err| violations.push(email_violation(&err)))
            .ok();

        match (display_name, email) {
            (Some(display_name), Some(email)) if violations.is_empty() => {
                Ok((display_name, email))
            }
            _ => Err(violations),
        }
    }

    async fn load_account(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("account not found"))
    }

    /// Reject the email when a *different* account already holds it.
    async fn check_email_collision(
        &self,
        caller: &UserId,
        email: &EmailAddress,
    ) -> Result<(), Error> {
        let existing = self
            .users
            .find_by_email(email)
            .await
            .map_err(Self::map_repository_error)?;

        match existing {
            Some(user) if &user.id != caller => Err(email_taken_error()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R, H> RegistrationService for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, draft: RegistrationDraft) -> Result<Profile, Error> {
        let mut violations = Vec::new();
        let parsed = Self::parse_profile_fields(&draft.name, &draft.email);
        if draft.password.is_empty() {
            violations.push(FieldViolation::empty("password"));
        }

        let (display_name, email) = match parsed {
            Ok(fields) if violations.is_empty() => fields,
            Ok(_) => return Err(validation_error(violations)),
            Err(mut field_violations) => {
                field_violations.append(&mut violations);
                return Err(validation_error(field_violations));
            }
        };

        if self
            .users
            .find_by_email(&email)
            .await
            .map_err(Self::map_repository_error)?
            .is_some()
        {
            return Err(email_taken_error());
        }

        let hash = self
            .hasher
            .hash(&draft.password)
            .map_err(Self::map_hash_error)?;

        let user = User::builder(UserId::random(), display_name, email)
            .password_hash(hash)
            .build();

        // The unique index is the arbiter if another registration races us;
        // EmailTaken surfaces as the same conflict the pre-check reports.
        self.users
            .insert(&user)
            .await
            .map_err(Self::map_repository_error)?;

        Ok(user.profile())
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_repository_error)?;

        // Unknown email, federated-only account, and wrong password all
        // produce the same outward failure.
        let invalid = || Error::unauthorized("invalid credentials");

        let user = user.ok_or_else(invalid)?;
        let hash = user.password_hash.as_ref().ok_or_else(invalid)?;
        let verified = self
            .hasher
            .verify(credentials.password(), hash)
            .map_err(Self::map_hash_error)?;

        if verified { Ok(user.id) } else { Err(invalid()) }
    }
}

#[async_trait]
impl<R, H> ProfileQuery for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Profile, Error> {
        Ok(self.load_account(user_id).await?.profile())
    }
}

#[async_trait]
impl<R, H> ProfileCommand for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn update_profile(
        &self,
        user_id: &UserId,
        request: ProfileUpdateRequest,
    ) -> Result<Profile, Error> {
        let (display_name, email) = Self::parse_profile_fields(&request.name, &request.email)
            .map_err(validation_error)?;

        let mut user = self.load_account(user_id).await?;
        self.check_email_collision(user_id, &email).await?;

        user.display_name = display_name;
        user.email = email;
        user.updated_at = chrono::Utc::now();
        self.users
            .update(&user)
            .await
            .map_err(Self::map_repository_error)?;

        Ok(user.profile())
    }

    async fn change_password(
        &self,
        user_id: &UserId,
        change: PasswordChange,
    ) -> Result<(), Error> {
        let mut user = self.load_account(user_id).await?;

        // Federated-only accounts carry no local credential to change.
        let Some(current_hash) = user.password_hash.as_ref() else {
            return Err(
                Error::invalid_request("account has no local password").with_details(json!({
                    "field": "currentPassword",
                    "code": "no_local_password",
                })),
            );
        };

        let verified = self
            .hasher
            .verify(change.current(), current_hash)
            .map_err(Self::map_hash_error)?;
        if !verified {
            return Err(Error::unauthorized("current password is incorrect"));
        }

        let new_hash = self
            .hasher
            .hash(change.new_password())
            .map_err(Self::map_hash_error)?;
        user.password_hash = Some(new_hash);
        user.updated_at = chrono::Utc::now();

        self.users
            .update(&user)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{FixturePasswordHasher, InMemoryUserRepository};
    use rstest::rstest;

    type HarnessService = AccountService<InMemoryUserRepository, FixturePasswordHasher>;

    fn make_service() -> HarnessService {
        AccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(FixturePasswordHasher),
        )
    }

    fn draft(name: &str, email: &str, password: &str) -> RegistrationDraft {
        RegistrationDraft::new(name, email, password)
    }

    async fn register(service: &HarnessService, email: &str) -> Profile {
        service
            .register(draft("Demo User", email, "password123"))
            .await
            .expect("registration succeeds")
    }

    #[tokio::test]
    async fn register_then_authenticate_round_trips() {
        let service = make_service();
        let profile = register(&service, "demo@example.com").await;
        assert!(profile.has_password);

        let creds = LoginCredentials::try_from_parts("Demo@Example.com", "password123")
            .expect("credentials");
        let user_id = service.authenticate(&creds).await.expect("login succeeds");
        assert_eq!(user_id, profile.id);
    }

    #[tokio::test]
    async fn register_collects_all_violations() {
        let service = make_service();
        let error = service
            .register(draft("", "not-an-email", ""))
            .await
            .expect_err("validation failure");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let violations = error
            .details()
            .and_then(|d| d.get("violations"))
            .and_then(|v| v.as_array())
            .expect("violation list");
        let fields: Vec<_> = violations
            .iter()
            .filter_map(|v| v.get("field").and_then(serde_json::Value::as_str))
            .collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
    }

    #[tokio::test]
    async fn register_rejects_taken_email_case_insensitively() {
        let service = make_service();
        register(&service, "demo@example.com").await;

        let error = service
            .register(draft("Other", "DEMO@EXAMPLE.COM", "hunter2"))
            .await
            .expect_err("conflict");
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(
            error
                .details()
                .and_then(|d| d.get("code"))
                .and_then(serde_json::Value::as_str),
            Some("email_taken")
        );
    }

    #[rstest]
    #[case("unknown@example.com", "password123")]
    #[case("demo@example.com", "wrong-password")]
    #[tokio::test]
    async fn authenticate_rejects_bad_credentials_uniformly(
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let service = make_service();
        register(&service, "demo@example.com").await;

        let creds = LoginCredentials::try_from_parts(email, password).expect("credentials");
        let error = service.authenticate(&creds).await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), "invalid credentials");
    }

    #[tokio::test]
    async fn authenticate_rejects_federated_only_accounts() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let federated = User::builder(
            UserId::random(),
            DisplayName::new("Federated").expect("name"),
            EmailAddress::new("fed@example.com").expect("email"),
        )
        .build();
        repo.insert(&federated).await.expect("seed");
        let service = AccountService::new(repo, Arc::new(FixturePasswordHasher));

        let creds =
            LoginCredentials::try_from_parts("fed@example.com", "anything").expect("credentials");
        let error = service.authenticate(&creds).await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), "invalid credentials");
    }

    #[tokio::test]
    async fn fetch_profile_redacts_the_hash() {
        let service = make_service();
        let registered = register(&service, "demo@example.com").await;

        let profile = service
            .fetch_profile(&registered.id)
            .await
            .expect("profile");
        assert_eq!(profile.email.as_ref(), "demo@example.com");
        assert!(profile.has_password);
    }

    #[tokio::test]
    async fn fetch_profile_of_unknown_account_is_not_found() {
        let service = make_service();
        let error = service
            .fetch_profile(&UserId::random())
            .await
            .expect_err("not found");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn update_profile_to_anothers_email_conflicts_and_changes_nothing() {
        let service = make_service();
        let first = register(&service, "first@example.com").await;
        let second = register(&service, "second@example.com").await;

        let error = service
            .update_profile(
                &second.id,
                ProfileUpdateRequest {
                    name: "Second".into(),
                    email: "first@example.com".into(),
                },
            )
            .await
            .expect_err("conflict");
        assert_eq!(error.code(), ErrorCode::Conflict);

        let unchanged_first = service.fetch_profile(&first.id).await.expect("profile");
        let unchanged_second = service.fetch_profile(&second.id).await.expect("profile");
        assert_eq!(unchanged_first.email.as_ref(), "first@example.com");
        assert_eq!(unchanged_second.email.as_ref(), "second@example.com");
    }

    #[tokio::test]
    async fn update_profile_keeping_own_email_succeeds() {
        let service = make_service();
        let registered = register(&service, "demo@example.com").await;

        let profile = service
            .update_profile(
                &registered.id,
                ProfileUpdateRequest {
                    name: "Renamed".into(),
                    email: "demo@example.com".into(),
                },
            )
            .await
            .expect("self-email update succeeds");
        assert_eq!(profile.display_name.as_ref(), "Renamed");
        assert_eq!(profile.email.as_ref(), "demo@example.com");
    }

    #[tokio::test]
    async fn change_password_verifies_the_current_secret() {
        let service = make_service();
        let registered = register(&service, "demo@example.com").await;

        let wrong = PasswordChange::try_from_parts("wrong", "new-secret").expect("change");
        let error = service
            .change_password(&registered.id, wrong)
            .await
            .expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::Unauthorized);

        let change = PasswordChange::try_from_parts("password123", "new-secret").expect("change");
        service
            .change_password(&registered.id, change)
            .await
            .expect("change succeeds");

        let creds = LoginCredentials::try_from_parts("demo@example.com", "new-secret")
            .expect("credentials");
        service
            .authenticate(&creds)
            .await
            .expect("new password works");
    }

    #[tokio::test]
    async fn change_password_is_refused_for_federated_only_accounts() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let federated = User::builder(
            UserId::random(),
            DisplayName::new("Federated").expect("name"),
            EmailAddress::new("fed@example.com").expect("email"),
        )
        .build();
        repo.insert(&federated).await.expect("seed");
        let service = AccountService::new(repo, Arc::new(FixturePasswordHasher));

        let change = PasswordChange::try_from_parts("anything", "new-secret").expect("change");
        let error = service
            .change_password(&federated.id, change)
            .await
            .expect_err("refused");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error
                .details()
                .and_then(|d| d.get("code"))
                .and_then(serde_json::Value::as_str),
            Some("no_local_password")
        );
    }
}
