//! Like repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr,
};
use uuid::Uuid;

use super::entities::like;
use crate::domain::Like;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn find(&self, user_id: Uuid, recipe_id: i64) -> AppResult<Option<Like>>;

    /// Insert a like. A concurrent duplicate surfaces as `LikeAlreadyExists`.
    async fn create(&self, user_id: Uuid, recipe_id: i64) -> AppResult<Like>;

    async fn count_for_recipe(&self, recipe_id: i64) -> AppResult<u64>;

    async fn delete(&self, user_id: Uuid, recipe_id: i64) -> AppResult<bool>;
}

pub struct LikeStore {
    db: DatabaseConnection,
}

impl LikeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LikeRepository for LikeStore {
    async fn find(&self, user_id: Uuid, recipe_id: i64) -> AppResult<Option<Like>> {
        let model = like::Entity::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::RecipeId.eq(recipe_id))
            .one(&self.db)
            .await?;
        Ok(model.map(Like::from))
    }

    async fn create(&self, user_id: Uuid, recipe_id: i64) -> AppResult<Like> {
        let model = like::ActiveModel {
            user_id: Set(Some(user_id)),
            recipe_id: Set(recipe_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::LikeAlreadyExists { user_id, recipe_id }
            }
            _ => AppError::from(e),
        })?;
        Ok(Like::from(model))
    }

    async fn count_for_recipe(&self, recipe_id: i64) -> AppResult<u64> {
        let count = like::Entity::find()
            .filter(like::Column::RecipeId.eq(recipe_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn delete(&self, user_id: Uuid, recipe_id: i64) -> AppResult<bool> {
        let result = like::Entity::delete_many()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::RecipeId.eq(recipe_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
