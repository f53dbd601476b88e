//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, ModemCommand, ModemQuery, ProfileCommand, ProfileQuery, RegistrationService,
};

/// Dependency bundle for HTTP handlers.
///
/// Account ports and modem ports are usually backed by one service each, but
/// the handlers only ever see the port traits, so tests can swap any subset
/// for doubles.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profile: Arc<dyn ProfileQuery>,
    pub profile_command: Arc<dyn ProfileCommand>,
    pub modems: Arc<dyn ModemQuery>,
    pub modem_command: Arc<dyn ModemCommand>,
}
