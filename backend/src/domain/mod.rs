//! Domain primitives, aggregates, services, and ports.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable where practical and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Identity is always passed explicitly: every service operation takes the
//! caller's [`UserId`] as a parameter, never an ambient lookup, so the core
//! stays testable without a real session layer.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod modem;
pub mod modem_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    CredentialValidationError, LoginCredentials, PasswordChange, RegistrationDraft,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::modem::{FieldViolation, Modem, ModemDraft};
pub use self::modem_service::ModemService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    CredentialHash, DisplayName, EmailAddress, Profile, User, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
