//! Port abstraction for account persistence adapters and their errors.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email unique index rejected the write.
        EmailTaken => "email already registered",
    }
}

/// Port for account storage and retrieval.
///
/// Email uniqueness is the adapter's responsibility (a unique index in the
/// database adapter); writes that lose the race surface
/// [`UserRepositoryError::EmailTaken`] so the service can report a conflict
/// instead of an opaque failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch an account by normalized email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Replace the stored account record.
    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;
}

/// In-memory implementation backing the test harness.
///
/// Enforces email uniqueness the way the database adapter's unique index
/// does, so conflict paths are exercisable without a database.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, User>> {
        match self.users.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.lock();
        if users.values().any(|stored| stored.email == user.email) {
            return Err(UserRepositoryError::email_taken());
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock().get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.lock();
        if users
            .values()
            .any(|stored| stored.email == user.email && stored.id != user.id)
        {
            return Err(UserRepositoryError::email_taken());
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}
