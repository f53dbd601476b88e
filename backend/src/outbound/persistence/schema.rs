//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User accounts table.
    ///
    /// Stores registered accounts with display names, lowercased unique
    /// emails, optional local credential hashes, and audit timestamps.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-readable display name (max 64 characters).
        display_name -> Varchar,
        /// Lowercased email address; unique index `users_email_key`.
        email -> Varchar,
        /// Local credential hash; NULL for federated-only accounts.
        password_hash -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Modem credential records table.
    ///
    /// Each row is a set of access credentials for a network device, owned
    /// by exactly one account. All queries against this table are
    /// owner-scoped.
    modems (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name for the device.
        name -> Varchar,
        /// Device type label (vendor/model).
        device_type -> Varchar,
        /// Dotted-quad IPv4 address.
        ip_address -> Varchar,
        /// Device login username.
        username -> Varchar,
        /// Device login secret, stored in clear.
        password -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Owning account; foreign key to `users.id`.
        user_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(modems -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(modems, users);
