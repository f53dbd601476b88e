//! Backend library modules.
//!
//! A per-user credential vault for network-device access: session-cookie
//! authentication over an owner-scoped CRUD core, persisted in PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-scoped correlation identifier.
pub use domain::TraceId;
/// Request tracing middleware.
pub use middleware::Trace;
