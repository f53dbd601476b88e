//! Port for modem record persistence.
//!
//! Every read and mutation on this port is owner-scoped: there is no way to
//! address a record by identifier alone. Adapters must filter on both the
//! record identifier and the owning account so a caller can never observe or
//! touch another account's records.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Modem, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by modem repository adapters.
    pub enum ModemRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "modem repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "modem repository query failed: {message}",
    }
}

/// Port for owner-scoped modem record storage.
///
/// # Ownership Scoping
///
/// `find_by_id_and_owner`, `update`, and `delete` all match on identifier
/// *and* owner. A mismatch on either behaves exactly like a missing record,
/// so "doesn't exist" and "exists but isn't yours" are indistinguishable to
/// callers by construction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModemRepository: Send + Sync {
    /// List the owner's records, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Modem>, ModemRepositoryError>;

    /// Insert a new record.
    async fn insert(&self, modem: &Modem) -> Result<(), ModemRepositoryError>;

    /// Fetch a record matching both identifier and owner.
    async fn find_by_id_and_owner(
        &self,
        id: Uuid,
        owner: &UserId,
    ) -> Result<Option<Modem>, ModemRepositoryError>;

    /// Replace the stored record, matching on identifier and owner.
    async fn update(&self, modem: &Modem) -> Result<(), ModemRepositoryError>;

    /// Hard-delete a record matching both identifier and owner.
    async fn delete(&self, id: Uuid, owner: &UserId) -> Result<(), ModemRepositoryError>;
}

/// In-memory implementation backing the test harness.
///
/// Holds records in a mutex-guarded map so handler and service tests can run
/// the full stack without a database. Not intended for production use.
#[derive(Debug, Default)]
pub struct InMemoryModemRepository {
    records: Mutex<HashMap<Uuid, Modem>>,
}

impl InMemoryModemRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, across all owners.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the repository holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Modem>> {
        match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl ModemRepository for InMemoryModemRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Modem>, ModemRepositoryError> {
        let mut records: Vec<Modem> = self
            .lock()
            .values()
            .filter(|modem| &modem.owner_id == owner)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn insert(&self, modem: &Modem) -> Result<(), ModemRepositoryError> {
        self.lock().insert(modem.id, modem.clone());
        Ok(())
    }

    async fn find_by_id_and_owner(
        &self,
        id: Uuid,
        owner: &UserId,
    ) -> Result<Option<Modem>, ModemRepositoryError> {
        Ok(self
            .lock()
            .get(&id)
            .filter(|modem| &modem.owner_id == owner)
            .cloned())
    }

    async fn update(&self, modem: &Modem) -> Result<(), ModemRepositoryError> {
        let mut records = self.lock();
        if let Some(stored) = records
            .get_mut(&modem.id)
            .filter(|stored| stored.owner_id == modem.owner_id)
        {
            *stored = modem.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid, owner: &UserId) -> Result<(), ModemRepositoryError> {
        let mut records = self.lock();
        if records
            .get(&id)
            .is_some_and(|stored| &stored.owner_id == owner)
        {
            records.remove(&id);
        }
        Ok(())
    }
}
