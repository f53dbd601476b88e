//! Account HTTP handlers: registration, login, logout, profile, password.
//!
//! ```text
//! POST /api/v1/register {"name":"Demo User","email":"demo@example.com","password":"password123"}
//! POST /api/v1/login    {"email":"demo@example.com","password":"password123"}
//! POST /api/v1/logout
//! GET  /api/v1/users/me
//! PUT  /api/v1/users/me
//! PUT  /api/v1/users/me/password
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::ProfileUpdateRequest;
use crate::domain::{
    CredentialValidationError, Error, LoginCredentials, PasswordChange, Profile, RegistrationDraft,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_field};

/// Registration request body for `POST /api/v1/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile update body for `PUT /api/v1/users/me`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Password change body for `PUT /api/v1/users/me/password`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Redacted account response payload.
///
/// The stored credential hash never appears here; it collapses to the
/// `hasPassword` flag.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub has_password: bool,
}

impl From<Profile> for ProfileResponse {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id.to_string(),
            display_name: value.display_name.into(),
            email: value.email.into(),
            has_password: value.has_password,
        }
    }
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = CredentialValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_credential_validation_error(err: CredentialValidationError) -> Error {
    match err {
        CredentialValidationError::InvalidEmail => {
            Error::invalid_request("email must be a valid address")
                .with_details(json!({ "field": "email", "code": "invalid_email" }))
        }
        CredentialValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_field" }))
        }
    }
}

/// Create a local account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Created account profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let name = require_field(payload.name, FieldName::new("name"))?;
    let email = require_field(payload.email, FieldName::new("email"))?;
    let password = require_field(payload.password, FieldName::new("password"))?;

    let profile = state
        .registration
        .register(RegistrationDraft::new(name, email, &password))
        .await?;
    Ok(HttpResponse::Created().json(ProfileResponse::from(profile)))
}

/// Authenticate and establish a session.
///
/// Uses the centralised `Error` type so clients get a consistent error
/// schema across all endpoints.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(map_credential_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Drop the caller's session.
///
/// Idempotent: logging out without a session is still a success.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared"),
    ),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Fetch the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Account profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account missing", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getProfile"
)]
#[get("/users/me")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let profile = state.profile.fetch_profile(&user_id).await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// Replace the authenticated user's display name and email.
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = ProfilePayload,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/users/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfilePayload>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let request = ProfileUpdateRequest {
        name: require_field(payload.name, FieldName::new("name"))?,
        email: require_field(payload.email, FieldName::new("email"))?,
    };

    let profile = state
        .profile_command
        .update_profile(&user_id, request)
        .await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// Replace the authenticated user's local password.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/password",
    request_body = PasswordChangeRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "changePassword"
)]
#[put("/users/me/password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PasswordChangeRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let change = PasswordChange::try_from_parts(&payload.current_password, &payload.new_password)
        .map_err(map_credential_validation_error)?;

    state
        .profile_command
        .change_password(&user_id, change)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{login_as, register_account, test_state_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::Value;

    #[actix_web::test]
    async fn register_returns_a_redacted_profile() {
        let app = actix_test::init_service(test_state_app()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(&RegisterRequest {
                    name: Some("Demo User".into()),
                    email: Some("Demo@Example.com".into()),
                    password: Some("password123".into()),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("email").and_then(Value::as_str),
            Some("demo@example.com")
        );
        assert_eq!(body.get("hasPassword").and_then(Value::as_bool), Some(true));
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn register_rejects_duplicate_email_with_conflict() {
        let app = actix_test::init_service(test_state_app()).await;
        register_account(&app, "demo@example.com").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(&RegisterRequest {
                    name: Some("Other".into()),
                    email: Some("DEMO@example.com".into()),
                    password: Some("hunter2".into()),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.get("code").and_then(Value::as_str), Some("conflict"));
    }

    #[actix_web::test]
    async fn login_rejects_unknown_credentials() {
        let app = actix_test::init_service(test_state_app()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(&LoginRequest {
                    email: "nobody@example.com".into(),
                    password: "password123".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("invalid credentials")
        );
    }

    #[actix_web::test]
    async fn login_rejects_malformed_email_as_invalid_request() {
        let app = actix_test::init_service(test_state_app()).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(&LoginRequest {
                    email: "not-an-email".into(),
                    password: "password123".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("details")
                .and_then(|d| d.get("field"))
                .and_then(Value::as_str),
            Some("email")
        );
    }

    #[actix_web::test]
    async fn profile_round_trip_and_logout() {
        let app = actix_test::init_service(test_state_app()).await;
        let cookie = login_as(&app, "demo@example.com").await;

        let me_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(me_res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(me_res).await;
        assert_eq!(
            body.get("email").and_then(Value::as_str),
            Some("demo@example.com")
        );

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/logout")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
        let cleared = logout_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("removal cookie")
            .into_owned();

        let me_again = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(me_again.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn profile_update_to_taken_email_conflicts() {
        let app = actix_test::init_service(test_state_app()).await;
        register_account(&app, "taken@example.com").await;
        let cookie = login_as(&app, "caller@example.com").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/users/me")
                .cookie(cookie.clone())
                .set_json(&ProfilePayload {
                    name: Some("Caller".into()),
                    email: Some("taken@example.com".into()),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("details")
                .and_then(|d| d.get("code"))
                .and_then(Value::as_str),
            Some("email_taken")
        );

        // Own email is unchanged.
        let me_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(me_res).await;
        assert_eq!(
            body.get("email").and_then(Value::as_str),
            Some("caller@example.com")
        );
    }

    #[actix_web::test]
    async fn profile_update_keeping_own_email_succeeds() {
        let app = actix_test::init_service(test_state_app()).await;
        let cookie = login_as(&app, "demo@example.com").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/users/me")
                .cookie(cookie)
                .set_json(&ProfilePayload {
                    name: Some("Renamed".into()),
                    email: Some("demo@example.com".into()),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("displayName").and_then(Value::as_str),
            Some("Renamed")
        );
    }

    #[actix_web::test]
    async fn password_change_requires_the_current_secret() {
        let app = actix_test::init_service(test_state_app()).await;
        let cookie = login_as(&app, "demo@example.com").await;

        let wrong_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/users/me/password")
                .cookie(cookie.clone())
                .set_json(&PasswordChangeRequest {
                    current_password: "wrong".into(),
                    new_password: "new-secret".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(wrong_res.status(), StatusCode::UNAUTHORIZED);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/users/me/password")
                .cookie(cookie)
                .set_json(&PasswordChangeRequest {
                    current_password: "password123".into(),
                    new_password: "new-secret".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let relogin = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(&LoginRequest {
                    email: "demo@example.com".into(),
                    password: "new-secret".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(relogin.status(), StatusCode::OK);
    }
}
