//! Driving port for modem record reads.

use async_trait::async_trait;

use crate::domain::{Error, Modem, UserId};

/// Domain use-case port for listing the caller's modem records.
#[async_trait]
pub trait ModemQuery: Send + Sync {
    /// List the caller's records, newest first. The result is unbounded; the
    /// vault has no pagination at current scale.
    async fn list_modems(&self, owner: &UserId) -> Result<Vec<Modem>, Error>;
}
