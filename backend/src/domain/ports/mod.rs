//! Domain ports: the seams between the core and its adapters.
//!
//! Driving ports (`LoginService`, `RegistrationService`, `ProfileQuery`,
//! `ProfileCommand`, `ModemQuery`, `ModemCommand`) are implemented by domain
//! services and called by inbound adapters. Driven ports (`UserRepository`,
//! `ModemRepository`, `PasswordHasher`) are implemented by outbound adapters
//! and called by domain services.
//!
//! Each driven port ships an in-memory or fixture implementation so the full
//! stack can be exercised in tests without infrastructure.

mod login_service;
mod macros;
mod modem_command;
mod modem_query;
mod modem_repository;
mod password_hasher;
mod profile_command;
mod profile_query;
mod registration;
mod user_repository;

pub(crate) use macros::define_port_error;

pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
pub use modem_command::ModemCommand;
pub use modem_query::ModemQuery;
pub use modem_repository::{InMemoryModemRepository, ModemRepository, ModemRepositoryError};
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
pub use profile_command::{ProfileCommand, ProfileUpdateRequest};
pub use profile_query::{FixtureProfileQuery, ProfileQuery};
pub use registration::RegistrationService;
pub use user_repository::{InMemoryUserRepository, UserRepository, UserRepositoryError};

#[cfg(test)]
pub use modem_repository::MockModemRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
