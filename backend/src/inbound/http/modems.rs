//! Modem record HTTP handlers.
//!
//! ```text
//! GET    /api/v1/modems
//! POST   /api/v1/modems
//! PUT    /api/v1/modems/{id}
//! DELETE /api/v1/modems/{id}
//! ```
//!
//! Every handler resolves the session identity first; the services then
//! enforce ownership, so a record that is missing and a record owned by
//! another account both answer 404.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Modem, ModemDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_field};

/// Request payload for creating or replacing a modem record.
///
/// All fields except `description` are required; absences are rejected with
/// a field-level error before content validation runs.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModemPayload {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub ip_address: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub description: Option<String>,
}

/// Response payload for a modem record.
///
/// The device login secret is returned verbatim: the vault is a credential
/// manager and the secret is the payload. Only *account* credentials are
/// redacted.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModemResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub ip_address: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Modem> for ModemResponse {
    fn from(value: Modem) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            device_type: value.device_type,
            ip_address: value.ip_address,
            username: value.username,
            password: value.password,
            description: value.description,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Acknowledgment body returned by delete.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub message: String,
}

fn draft_from_payload(payload: ModemPayload) -> ApiResult<ModemDraft> {
    Ok(ModemDraft {
        name: require_field(payload.name, FieldName::new("name"))?,
        device_type: require_field(payload.device_type, FieldName::new("type"))?,
        ip_address: require_field(payload.ip_address, FieldName::new("ipAddress"))?,
        username: require_field(payload.username, FieldName::new("username"))?,
        password: require_field(payload.password, FieldName::new("password"))?,
        description: payload.description,
    })
}

/// List the authenticated user's modem records, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/modems",
    responses(
        (status = 200, description = "Owned modem records", body = [ModemResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["modems"],
    operation_id = "listModems"
)]
#[get("/modems")]
pub async fn list_modems(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ModemResponse>>> {
    let user_id = session.require_user_id()?;
    let modems = state.modems.list_modems(&user_id).await?;
    Ok(web::Json(
        modems.into_iter().map(ModemResponse::from).collect(),
    ))
}

/// Create a modem record owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/modems",
    request_body = ModemPayload,
    responses(
        (status = 201, description = "Created modem record", body = ModemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["modems"],
    operation_id = "createModem"
)]
#[post("/modems")]
pub async fn create_modem(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ModemPayload>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let draft = draft_from_payload(payload.into_inner())?;
    let modem = state.modem_command.create_modem(&user_id, draft).await?;
    Ok(HttpResponse::Created().json(ModemResponse::from(modem)))
}

/// Replace all mutable fields of an owned modem record.
#[utoipa::path(
    put,
    path = "/api/v1/modems/{id}",
    request_body = ModemPayload,
    params(
        ("id" = Uuid, Path, description = "Modem record identifier")
    ),
    responses(
        (status = 200, description = "Updated modem record", body = ModemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["modems"],
    operation_id = "updateModem"
)]
#[put("/modems/{id}")]
pub async fn update_modem(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
    payload: web::Json<ModemPayload>,
) -> ApiResult<web::Json<ModemResponse>> {
    let user_id = session.require_user_id()?;
    let draft = draft_from_payload(payload.into_inner())?;
    let modem = state
        .modem_command
        .update_modem(&user_id, id.into_inner(), draft)
        .await?;
    Ok(web::Json(ModemResponse::from(modem)))
}

/// Hard-delete an owned modem record.
#[utoipa::path(
    delete,
    path = "/api/v1/modems/{id}",
    params(
        ("id" = Uuid, Path, description = "Modem record identifier")
    ),
    responses(
        (status = 200, description = "Deletion acknowledgment", body = DeleteAck),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["modems"],
    operation_id = "deleteModem"
)]
#[delete("/modems/{id}")]
pub async fn delete_modem(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<DeleteAck>> {
    let user_id = session.require_user_id()?;
    state
        .modem_command
        .delete_modem(&user_id, id.into_inner())
        .await?;
    Ok(web::Json(DeleteAck {
        message: "modem deleted".to_owned(),
    }))
}
