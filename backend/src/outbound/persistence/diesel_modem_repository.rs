//! PostgreSQL-backed `ModemRepository` implementation using Diesel ORM.
//!
//! Every query in this adapter filters on the owning account as well as the
//! record identifier. There is deliberately no delete-by-id or
//! update-by-id path: the owner predicate is part of every statement, so a
//! cross-owner mutation cannot be expressed here at all.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ModemRepository, ModemRepositoryError};
use crate::domain::{Modem, UserId};

use super::models::{ModemRow, ModemUpdate, NewModemRow};
use super::pool::{DbPool, PoolError};
use super::schema::modems;

/// Diesel-backed implementation of the `ModemRepository` port.
#[derive(Clone)]
pub struct DieselModemRepository {
    pool: DbPool,
}

impl DieselModemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain modem repository errors.
fn map_pool_error(error: PoolError) -> ModemRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ModemRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain modem repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ModemRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ModemRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ModemRepositoryError::connection("database connection error")
        }
        _ => ModemRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain modem record.
fn row_to_modem(row: ModemRow) -> Modem {
    Modem {
        id: row.id,
        name: row.name,
        device_type: row.device_type,
        ip_address: row.ip_address,
        username: row.username,
        password: row.password,
        description: row.description,
        owner_id: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl ModemRepository for DieselModemRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Modem>, ModemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ModemRow> = modems::table
            .filter(modems::user_id.eq(owner.as_uuid()))
            .order(modems::created_at.desc())
            .select(ModemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_modem).collect())
    }

    async fn insert(&self, modem: &Modem) -> Result<(), ModemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewModemRow {
            id: modem.id,
            name: &modem.name,
            device_type: &modem.device_type,
            ip_address: &modem.ip_address,
            username: &modem.username,
            password: &modem.password,
            description: modem.description.as_deref(),
            user_id: *modem.owner_id.as_uuid(),
            created_at: modem.created_at,
            updated_at: modem.updated_at,
        };

        diesel::insert_into(modems::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id_and_owner(
        &self,
        id: Uuid,
        owner: &UserId,
    ) -> Result<Option<Modem>, ModemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ModemRow> = modems::table
            .filter(modems::id.eq(id).and(modems::user_id.eq(owner.as_uuid())))
            .select(ModemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_modem))
    }

    async fn update(&self, modem: &Modem) -> Result<(), ModemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = ModemUpdate {
            name: &modem.name,
            device_type: &modem.device_type,
            ip_address: &modem.ip_address,
            username: &modem.username,
            password: &modem.password,
            description: Some(modem.description.as_deref()),
            updated_at: modem.updated_at,
        };

        diesel::update(modems::table)
            .filter(
                modems::id
                    .eq(modem.id)
                    .and(modems::user_id.eq(modem.owner_id.as_uuid())),
            )
            .set(&update)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: Uuid, owner: &UserId) -> Result<(), ModemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            modems::table.filter(modems::id.eq(id).and(modems::user_id.eq(owner.as_uuid()))),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }
}
