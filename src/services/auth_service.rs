//! Authentication service - account registration, login and token checks.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, MSG_DUPLICATE_USER, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::password::UNKNOWN_ACCOUNT_HASH;
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload. `sub` is the user id as a string.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Numeric user id carried in `sub`
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub.parse().map_err(|_| AppError::Unauthorized)
    }
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 43200)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account with the default role
    async fn register(&self, username: String, email: String, password: String) -> AppResult<User>;

    /// Login and return JWT token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, username: String, email: String, password: String) -> AppResult<User> {
        if self
            .uow
            .users()
            .find_by_username_or_email(&username, &email)
            .await?
            .is_some()
        {
            tracing::warn!(%username, "Registration rejected, username or email taken");
            return Err(AppError::conflict(MSG_DUPLICATE_USER));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .uow
            .users()
            .create(username, email, password_hash)
            .await
            .map_err(|e| e.or_conflict(MSG_DUPLICATE_USER))?;

        tracing::info!(user_id = user.id, "Account registered");
        Ok(user)
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_username(&username).await?;

        // Unknown accounts still pay for a hash verification
        let stored_hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| UNKNOWN_ACCOUNT_HASH.to_string());
        let password_valid = Password::from_hash(stored_hash).verify(&password);

        match user {
            Some(user) if password_valid => generate_token(&user, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
