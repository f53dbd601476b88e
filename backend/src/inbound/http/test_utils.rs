//! Test helpers for inbound HTTP components.
//!
//! The helpers wire the full handler surface over the in-memory port
//! implementations, so handler tests exercise session auth, validation, and
//! ownership scoping without any infrastructure.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, test, web};

use crate::domain::ports::{FixturePasswordHasher, InMemoryModemRepository, InMemoryUserRepository};
use crate::domain::{AccountService, ModemService};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build handler state over fresh in-memory repositories.
pub fn test_state() -> HttpState {
    let users = Arc::new(InMemoryUserRepository::new());
    let modems = Arc::new(InMemoryModemRepository::new());
    let accounts = Arc::new(AccountService::new(users, Arc::new(FixturePasswordHasher)));
    let modem_service = Arc::new(ModemService::new(modems));

    HttpState {
        login: accounts.clone(),
        registration: accounts.clone(),
        profile: accounts.clone(),
        profile_command: accounts,
        modems: modem_service.clone(),
        modem_command: modem_service,
    }
}

/// Build the full API surface over in-memory state.
pub fn test_state_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(test_state()))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(crate::inbound::http::users::register)
                .service(crate::inbound::http::users::login)
                .service(crate::inbound::http::users::logout)
                .service(crate::inbound::http::users::get_profile)
                .service(crate::inbound::http::users::update_profile)
                .service(crate::inbound::http::users::change_password)
                .service(crate::inbound::http::modems::list_modems)
                .service(crate::inbound::http::modems::create_modem)
                .service(crate::inbound::http::modems::update_modem)
                .service(crate::inbound::http::modems::delete_modem),
        )
}

/// Service bound produced by `test::init_service`.
pub trait TestService:
    actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >
{
}

impl<S> TestService for S where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >
{
}

/// Register an account with the fixture password (`password123`).
pub async fn register_account(app: &impl TestService, email: &str) {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(serde_json::json!({
                "name": "Demo User",
                "email": email,
                "password": "password123",
            }))
            .to_request(),
    )
    .await;
    assert!(
        res.status().is_success(),
        "registration failed: {}",
        res.status()
    );
}

/// Register (if needed) and log in, returning the session cookie.
pub async fn login_as(
    app: &impl TestService,
    email: &str,
) -> actix_web::cookie::Cookie<'static> {
    register_account(app, email).await;

    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({
                "email": email,
                "password": "password123",
            }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
