//! Account administration.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait UserService: Send + Sync {
    /// Grant the admin role to an account
    async fn promote_to_admin(&self, username: &str) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn promote_to_admin(&self, username: &str) -> AppResult<User> {
        let user = self
            .uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or(AppError::NotFound)?;

        if user.role == UserRole::Admin {
            return Ok(user);
        }

        let user = self
            .uow
            .users()
            .update_role(user.id, UserRole::Admin)
            .await?;
        tracing::info!(user_id = user.id, "Account promoted to admin");
        Ok(user)
    }
}
