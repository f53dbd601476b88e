//! Authentication primitives such as login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{EmailAddress, UserValidationError};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Email was missing or not a syntactically valid address.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalized the same way stored account emails are, so
///   lookups match regardless of input casing.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Demo@Example.com", "password123").unwrap();
/// assert_eq!(creds.email().as_ref(), "demo@example.com");
/// assert_eq!(creds.password(), "password123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        let email = EmailAddress::new(email).map_err(map_email_error)?;

        if password.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalized email suitable for account lookups.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated password-change request.
///
/// Both secrets are zeroized on drop. The current password is verified
/// against the stored hash before the new one is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    current: Zeroizing<String>,
    new: Zeroizing<String>,
}

impl PasswordChange {
    /// Construct a password change from raw secret inputs.
    pub fn try_from_parts(current: &str, new: &str) -> Result<Self, CredentialValidationError> {
        if current.is_empty() || new.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }

        Ok(Self {
            current: Zeroizing::new(current.to_owned()),
            new: Zeroizing::new(new.to_owned()),
        })
    }

    /// The caller's current password, for verification.
    pub fn current(&self) -> &str {
        self.current.as_str()
    }

    /// The replacement password.
    pub fn new_password(&self) -> &str {
        self.new.as_str()
    }
}

/// Raw registration payload handed to the account service.
///
/// Field content is validated by the service so all violations can be
/// collected into a single response rather than failing one at a time.
#[derive(Debug, Clone)]
pub struct RegistrationDraft {
    /// Requested display name.
    pub name: String,
    /// Requested email address.
    pub email: String,
    /// Requested local password, zeroized on drop.
    pub password: Zeroizing<String>,
}

impl RegistrationDraft {
    /// Bundle raw registration inputs.
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: &str) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Zeroizing::new(password.to_owned()),
        }
    }
}

fn map_email_error(_: UserValidationError) -> CredentialValidationError {
    CredentialValidationError::InvalidEmail
}
