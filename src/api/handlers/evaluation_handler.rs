//! Evaluation handlers, mounted under `/software`.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Evaluation, EvaluationReport, NewEvaluation};
use crate::errors::AppResult;
use crate::types::Created;

pub fn evaluation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:id/evaluations",
            get(list_evaluations).post(record_evaluation),
        )
        .route("/:id/evaluations/:evaluation_id", get(get_evaluation))
}

/// Record an evaluation of a software
#[utoipa::path(
    post,
    path = "/software/{id}/evaluations",
    tag = "Evaluations",
    params(("id" = i32, Path, description = "Software ID")),
    request_body = NewEvaluation,
    responses(
        (status = 201, description = "Evaluation recorded", body = EvaluationReport),
        (status = 400, description = "Validation error or unknown rubric row"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Software not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn record_evaluation(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<NewEvaluation>,
) -> AppResult<Created<EvaluationReport>> {
    let report = state
        .evaluation_service
        .record_evaluation(id, current_user.id, payload)
        .await?;
    Ok(Created::new(report))
}

/// List evaluations of a software, newest first
#[utoipa::path(
    get,
    path = "/software/{id}/evaluations",
    tag = "Evaluations",
    params(("id" = i32, Path, description = "Software ID")),
    responses(
        (status = 200, description = "Evaluations", body = Vec<Evaluation>),
        (status = 404, description = "Software not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_evaluations(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Evaluation>>> {
    let evaluations = state
        .evaluation_service
        .list_evaluations(id, current_user.id)
        .await?;
    Ok(Json(evaluations))
}

/// Get one evaluation with its details and summaries
#[utoipa::path(
    get,
    path = "/software/{id}/evaluations/{evaluation_id}",
    tag = "Evaluations",
    params(
        ("id" = i32, Path, description = "Software ID"),
        ("evaluation_id" = i32, Path, description = "Evaluation ID")
    ),
    responses(
        (status = 200, description = "Evaluation report", body = EvaluationReport),
        (status = 404, description = "Software or evaluation not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_evaluation(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((id, evaluation_id)): Path<(i32, i32)>,
) -> AppResult<Json<EvaluationReport>> {
    let report = state
        .evaluation_service
        .get_evaluation(id, evaluation_id, current_user.id)
        .await?;
    Ok(Json(report))
}
