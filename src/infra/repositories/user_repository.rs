//! Account repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{User, UserRole};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by login name
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user holding either the username or the email
    async fn find_by_username_or_email(&self, username: &str, email: &str)
        -> AppResult<Option<User>>;

    /// Create a new account with the default role
    async fn create(&self, username: String, email: String, password_hash: String)
        -> AppResult<User>;

    /// Change the role of an account
    async fn update_role(&self, id: i32, role: UserRole) -> AppResult<User>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(username))
                    .add(user::Column::Email.eq(email)),
            )
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> AppResult<User> {
        let active_model = ActiveModel {
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(UserRole::Client.as_str().to_string()),
            date_joined: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update_role(&self, id: i32, role: UserRole) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();
        active.role = Set(role.as_str().to_string());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }
}
