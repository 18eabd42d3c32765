//! Rubric handlers. Any authenticated user may read the rubric; changing it
//! requires the admin role.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{CharacteristicTree, NewCharacteristic, NewSubcharacteristic, Subcharacteristic};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Create rubric routes (require authentication)
pub fn rubric_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_characteristics).post(create_characteristic))
        .route("/:id", delete(delete_characteristic))
        .route("/:id/subcharacteristics", post(add_subcharacteristic))
}

/// List characteristics with their subcharacteristics
#[utoipa::path(
    get,
    path = "/characteristics",
    tag = "Rubric",
    responses(
        (status = 200, description = "Full rubric", body = Vec<CharacteristicTree>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_characteristics(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CharacteristicTree>>> {
    let rubric = state.rubric_service.list_characteristics().await?;
    Ok(Json(rubric))
}

/// Create a characteristic (admin only)
#[utoipa::path(
    post,
    path = "/characteristics",
    tag = "Rubric",
    request_body = NewCharacteristic,
    responses(
        (status = 201, description = "Characteristic created", body = CharacteristicTree),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_characteristic(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<NewCharacteristic>,
) -> AppResult<Created<CharacteristicTree>> {
    require_admin(&current_user)?;

    let tree = state.rubric_service.create_characteristic(payload).await?;
    Ok(Created::new(tree))
}

/// Add a subcharacteristic to a characteristic (admin only)
#[utoipa::path(
    post,
    path = "/characteristics/{id}/subcharacteristics",
    tag = "Rubric",
    params(("id" = i32, Path, description = "Characteristic ID")),
    request_body = NewSubcharacteristic,
    responses(
        (status = 201, description = "Subcharacteristic created", body = Subcharacteristic),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Characteristic not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_subcharacteristic(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<NewSubcharacteristic>,
) -> AppResult<Created<Subcharacteristic>> {
    require_admin(&current_user)?;

    let sub = state
        .rubric_service
        .add_subcharacteristic(id, payload)
        .await?;
    Ok(Created::new(sub))
}

/// Delete a characteristic (admin only)
///
/// Evaluations recorded against it keep their copied names and weights.
#[utoipa::path(
    delete,
    path = "/characteristics/{id}",
    tag = "Rubric",
    params(("id" = i32, Path, description = "Characteristic ID")),
    responses(
        (status = 204, description = "Characteristic deleted"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Characteristic not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_characteristic(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;

    state.rubric_service.delete_characteristic(id).await?;
    Ok(NoContent)
}
