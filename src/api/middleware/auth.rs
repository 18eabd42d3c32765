//! Bearer-token guard for the project and rubric routes.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::UserRole;
use crate::errors::{AppError, AppResult};

/// Caller identity taken from a verified token.
///
/// Every project, evaluation and risk query is scoped to `id`.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Token carried by an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects requests without a valid token and stores the [`CurrentUser`]
/// in the request extensions for the handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let claims = state.auth_service.verify_token(token)?;

    let user = CurrentUser {
        id: claims.user_id()?,
        role: UserRole::from(claims.role.as_str()),
        username: claims.username,
    };
    tracing::debug!(user_id = user.id, role = %user.role, "authenticated request");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Rubric edits are reserved to administrators.
pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if !user.is_admin() {
        tracing::warn!(user_id = user.id, "rubric change refused for non-admin");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_require_admin() {
        let mut user = CurrentUser {
            id: 1,
            username: "ana".to_string(),
            role: UserRole::Client,
        };
        assert!(matches!(require_admin(&user), Err(AppError::Forbidden)));

        user.role = UserRole::Admin;
        assert!(require_admin(&user).is_ok());
    }
}
