//! User repository - the identity store backed by PostgreSQL.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr,
};

use super::entities::{user, UserActiveModel, UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Identity store trait for dependency injection.
///
/// Records are created once and only read afterwards.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether any record already uses this username
    async fn exists_by_username(&self, username: &str) -> AppResult<bool>;

    /// Find a user by exact username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Persist a new user.
    ///
    /// Fails with a username validation error if the name is taken,
    /// even when a prior existence check passed.
    async fn create(&self, user: User) -> AppResult<User>;
}

/// Concrete implementation of UserRepository over SeaORM
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
    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let active_model = UserActiveModel {
            id: Set(user.id),
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            is_active: Set(user.is_active),
            created_at: Set(user.created_at),
        };

        match active_model.insert(&self.db).await {
            Ok(model) => Ok(User::from(model)),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                tracing::debug!("Unique constraint rejected duplicate username");
                Err(AppError::username_taken())
            }
            Err(err) => Err(AppError::from(err)),
        }
    }
}
