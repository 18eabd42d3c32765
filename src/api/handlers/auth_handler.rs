//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::Created;

/// Account registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 100, message = "El usuario es obligatorio (máx. 100)")
    )]
    #[schema(example = "ana")]
    pub username: String,
    #[validate(email(message = "Correo electrónico inválido"))]
    #[schema(example = "ana@example.com")]
    pub email: String,
    /// Minimum 8 characters
    #[validate(
        length(min = 8, message = "La contraseña debe tener al menos 8 caracteres")
    )]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "El usuario es obligatorio"))]
    #[schema(example = "ana")]
    pub username: String,
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state
        .auth_service
        .register(payload.username, payload.email, payload.password)
        .await?;

    Ok(Created::new(UserResponse::from(user)))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.username, payload.password)
        .await?;

    Ok(Json(token))
}
