//! HTTP server assembly: state wiring, app construction, and run loop.

pub mod config;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::ApiDoc;
use crate::domain::{AccountService, ModemService};
use crate::inbound::http::health::{self, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{modems, users};
use crate::middleware::Trace;
use crate::outbound::password::Argon2PasswordHasher;
use crate::outbound::persistence::{DbPool, DieselModemRepository, DieselUserRepository};

pub use config::ServerConfig;

/// Wire the database-backed services into the handler state bundle.
pub fn http_state(pool: DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let modems = Arc::new(DieselModemRepository::new(pool));
    let accounts = Arc::new(AccountService::new(users, Arc::new(Argon2PasswordHasher)));
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

/// Build the application with session middleware, tracing, and all routes.
pub fn build_app(
    state: HttpState,
    health_state: web::Data<HealthState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::get_profile)
        .service(users::update_profile)
        .service(users::change_password)
        .service(modems::list_modems)
        .service(modems::create_modem)
        .service(modems::update_modem)
        .service(modems::delete_modem);

    let mut app = App::new()
        .app_data(web::Data::new(state))
        .app_data(health_state)
        .wrap(Trace)
        .service(api)
        .service(health::ready)
        .service(health::live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}

/// Bind and run the server until shutdown.
pub async fn run(config: ServerConfig, state: HttpState) -> std::io::Result<()> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(
            state.clone(),
            server_health_state.clone(),
            key.clone(),
            cookie_secure,
            same_site,
        )
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
