//! Risk register handlers, mounted under `/software`.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{NewRisk, NewRiskMitigation, RiskMitigation, RiskRecord, SoftwareRisk};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

pub fn risk_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/risks", get(list_risks).post(register_risk))
        .route("/:id/risks/:risk_id", get(get_risk).delete(delete_risk))
        .route(
            "/:id/risks/:risk_id/mitigations",
            get(list_mitigations).post(add_mitigation),
        )
}

/// Register a risk with all of its components
#[utoipa::path(
    post,
    path = "/software/{id}/risks",
    tag = "Risks",
    params(("id" = i32, Path, description = "Software ID")),
    request_body = NewRisk,
    responses(
        (status = 201, description = "Risk registered", body = RiskRecord),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Software not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn register_risk(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<NewRisk>,
) -> AppResult<Created<RiskRecord>> {
    let record = state
        .risk_service
        .register_risk(id, current_user.id, payload)
        .await?;
    Ok(Created::new(record))
}

/// List the risks of a software
#[utoipa::path(
    get,
    path = "/software/{id}/risks",
    tag = "Risks",
    params(("id" = i32, Path, description = "Software ID")),
    responses(
        (status = 200, description = "Risks", body = Vec<SoftwareRisk>),
        (status = 404, description = "Software not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_risks(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<SoftwareRisk>>> {
    let risks = state.risk_service.list_risks(id, current_user.id).await?;
    Ok(Json(risks))
}

/// Get a risk with its ownership, classification, evaluation and controls
#[utoipa::path(
    get,
    path = "/software/{id}/risks/{risk_id}",
    tag = "Risks",
    params(
        ("id" = i32, Path, description = "Software ID"),
        ("risk_id" = i32, Path, description = "Risk ID")
    ),
    responses(
        (status = 200, description = "Risk found", body = RiskRecord),
        (status = 404, description = "Software or risk not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_risk(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((id, risk_id)): Path<(i32, i32)>,
) -> AppResult<Json<RiskRecord>> {
    let record = state
        .risk_service
        .get_risk(id, risk_id, current_user.id)
        .await?;
    Ok(Json(record))
}

/// Delete a risk and its components
#[utoipa::path(
    delete,
    path = "/software/{id}/risks/{risk_id}",
    tag = "Risks",
    params(
        ("id" = i32, Path, description = "Software ID"),
        ("risk_id" = i32, Path, description = "Risk ID")
    ),
    responses(
        (status = 204, description = "Risk deleted"),
        (status = 404, description = "Software or risk not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_risk(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((id, risk_id)): Path<(i32, i32)>,
) -> AppResult<NoContent> {
    state
        .risk_service
        .delete_risk(id, risk_id, current_user.id)
        .await?;
    Ok(NoContent)
}

/// Record a mitigation plan for a risk
#[utoipa::path(
    post,
    path = "/software/{id}/risks/{risk_id}/mitigations",
    tag = "Risks",
    params(
        ("id" = i32, Path, description = "Software ID"),
        ("risk_id" = i32, Path, description = "Risk ID")
    ),
    request_body = NewRiskMitigation,
    responses(
        (status = 201, description = "Mitigation recorded", body = RiskMitigation),
        (status = 400, description = "Component does not belong to the risk"),
        (status = 404, description = "Software or risk not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_mitigation(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((id, risk_id)): Path<(i32, i32)>,
    ValidatedJson(payload): ValidatedJson<NewRiskMitigation>,
) -> AppResult<Created<RiskMitigation>> {
    let mitigation = state
        .risk_service
        .add_mitigation(id, risk_id, current_user.id, payload)
        .await?;
    Ok(Created::new(mitigation))
}

/// List the mitigation plans of a risk
#[utoipa::path(
    get,
    path = "/software/{id}/risks/{risk_id}/mitigations",
    tag = "Risks",
    params(
        ("id" = i32, Path, description = "Software ID"),
        ("risk_id" = i32, Path, description = "Risk ID")
    ),
    responses(
        (status = 200, description = "Mitigations", body = Vec<RiskMitigation>),
        (status = 404, description = "Software or risk not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_mitigations(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((id, risk_id)): Path<(i32, i32)>,
) -> AppResult<Json<Vec<RiskMitigation>>> {
    let mitigations = state
        .risk_service
        .list_mitigations(id, risk_id, current_user.id)
        .await?;
    Ok(Json(mitigations))
}
