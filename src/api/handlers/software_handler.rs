//! Software project handlers.
//!
//! Reads return the resource itself. Registration answers
//! `{ success, message, software }`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};

use super::{evaluation_handler, risk_handler};
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{
    NewSoftware, Participant, SoftwareRegistered, SoftwareResponse, SoftwareSummary,
};
use crate::errors::{AppResult, OptionExt};
use crate::types::NoContent;

/// Create software routes (require authentication)
pub fn software_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_software).post(create_software))
        .route("/:id", get(get_software).delete(delete_software))
        .route("/:id/participants", get(list_participants))
        .merge(evaluation_handler::evaluation_routes())
        .merge(risk_handler::risk_routes())
}

/// Register a software project with its participants
#[utoipa::path(
    post,
    path = "/software",
    tag = "Software",
    request_body = NewSoftware,
    responses(
        (status = 201, description = "Software registered", body = SoftwareRegistered),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "The user already has a software with this name")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_software(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<NewSoftware>,
) -> AppResult<(StatusCode, Json<SoftwareRegistered>)> {
    let software = state
        .software_service
        .register_software(current_user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(SoftwareRegistered::from(software))))
}

/// List the caller's software with their latest evaluation
#[utoipa::path(
    get,
    path = "/software",
    tag = "Software",
    responses(
        (status = 200, description = "Software of the current user", body = Vec<SoftwareSummary>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_software(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<SoftwareSummary>>> {
    let software = state.software_service.list_software(current_user.id).await?;
    Ok(Json(software))
}

/// Get a software owned by the caller
#[utoipa::path(
    get,
    path = "/software/{id}",
    tag = "Software",
    params(("id" = i32, Path, description = "Software ID")),
    responses(
        (status = 200, description = "Software found", body = SoftwareResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Software not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_software(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<SoftwareResponse>> {
    let software = state
        .software_service
        .get_software_detail(id, current_user.id)
        .await?
        .ok_or_not_found()?;

    Ok(Json(SoftwareResponse::from(software)))
}

/// List the participants of a software
#[utoipa::path(
    get,
    path = "/software/{id}/participants",
    tag = "Software",
    params(("id" = i32, Path, description = "Software ID")),
    responses(
        (status = 200, description = "Participants", body = Vec<Participant>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Software not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_participants(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Participant>>> {
    let participants = state
        .software_service
        .list_participants(id, current_user.id)
        .await?;
    Ok(Json(participants))
}

/// Delete a software with its participants, evaluations and risks
#[utoipa::path(
    delete,
    path = "/software/{id}",
    tag = "Software",
    params(("id" = i32, Path, description = "Software ID")),
    responses(
        (status = 204, description = "Software deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Software not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_software(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .software_service
        .delete_software(id, current_user.id)
        .await?;
    Ok(NoContent)
}
