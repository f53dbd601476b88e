//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{modems, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub email: &'a str,
    pub password_hash: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub display_name: &'a str,
    pub email: &'a str,
    // Option<Option<..>> so a changeset can write NULL; plain None skips the
    // column, which would silently keep a stale hash.
    pub password_hash: Option<Option<&'a str>>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the modems table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = modems)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ModemRow {
    pub id: Uuid,
    pub name: String,
    pub device_type: String,
    pub ip_address: String,
    pub username: String,
    pub password: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new modem records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = modems)]
pub(crate) struct NewModemRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub device_type: &'a str,
    pub ip_address: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub description: Option<&'a str>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for replacing modem record fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = modems)]
pub(crate) struct ModemUpdate<'a> {
    pub name: &'a str,
    pub device_type: &'a str,
    pub ip_address: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    // See UserUpdate: double Option so clearing the description writes NULL.
    pub description: Option<Option<&'a str>>,
    pub updated_at: DateTime<Utc>,
}
