//! Application error type and its HTTP rendering.
//!
//! Every failure leaves the API as `{ "success": false, "code", "message" }`.
//! Messages are in Spanish, like the rest of the client-facing text; database,
//! token and internal failures are logged and replaced by a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::SqlErr;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Autenticación requerida")]
    Unauthorized,

    #[error("Acceso denegado")]
    Forbidden,

    #[error("Credenciales inválidas")]
    InvalidCredentials,

    /// Unknown id, or a row owned by another user
    #[error("Recurso no encontrado")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    /// Request body failed field validation
    #[error("{0}")]
    Validation(String),

    /// Request is well formed but refers to rows it cannot use
    #[error("{0}")]
    BadRequest(String),

    #[error("Error de base de datos")]
    Database(#[from] sea_orm::DbErr),

    #[error("Token inválido")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Error interno del servidor")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    code: &'static str,
    message: String,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Server-side failures are logged here.
    fn client_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!(error = ?e, "database error");
                self.to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!(error = ?e, "rejected token");
                self.to_string()
            }
            AppError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                self.to_string()
            }
            _ => self.to_string(),
        }
    }

    /// True when the database rejected a write because of a unique index.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Database(e) => {
                matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
            }
            _ => false,
        }
    }

    /// Maps a unique-index rejection to a conflict carrying `message`.
    pub fn or_conflict(self, message: &str) -> Self {
        if self.is_unique_violation() {
            AppError::conflict(message)
        } else {
            self
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        AppError::Internal(detail.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            code: self.code(),
            message: self.client_message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Turns a missing row into [`AppError::NotFound`]
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, RuntimeErr};

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(AppError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::internal("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::internal("pool exhausted on shard 3");
        assert_eq!(err.client_message(), "Error interno del servidor");

        let err = AppError::Database(DbErr::Conn(RuntimeErr::Internal("refused".into())));
        assert_eq!(err.client_message(), "Error de base de datos");
        assert_eq!(err.code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_or_conflict_keeps_other_errors() {
        let err = AppError::NotFound.or_conflict("duplicado");
        assert!(matches!(err, AppError::NotFound));
    }

    #[test]
    fn test_option_ext() {
        assert!(matches!(
            None::<i32>.ok_or_not_found(),
            Err(AppError::NotFound)
        ));
        assert_eq!(Some(7).ok_or_not_found().unwrap(), 7);
    }
}
