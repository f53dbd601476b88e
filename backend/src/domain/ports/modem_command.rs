//! Driving port for modem record mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Modem, ModemDraft, UserId};

/// Domain use-case port for creating, replacing, and deleting the caller's
/// modem records.
///
/// Every operation takes the caller's identity explicitly. Update and delete
/// report a missing record and a record owned by someone else identically,
/// as NotFound, so the existence of other accounts' records never leaks.
#[async_trait]
pub trait ModemCommand: Send + Sync {
    /// Validate the draft and persist a new record owned by the caller.
    async fn create_modem(&self, owner: &UserId, draft: ModemDraft) -> Result<Modem, Error>;

    /// Replace all mutable fields of an owned record.
    async fn update_modem(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: ModemDraft,
    ) -> Result<Modem, Error>;

    /// Hard-delete an owned record.
    async fn delete_modem(&self, owner: &UserId, id: Uuid) -> Result<(), Error>;
}
