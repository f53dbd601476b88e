//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Owner-scoped queries**: every modem statement carries the owning
//!   account predicate; a cross-owner read or mutation cannot be expressed.
//! - **Strongly typed errors**: all database errors are mapped to domain
//!   persistence error types.

mod diesel_modem_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_modem_repository::DieselModemRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
