//! Like service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Like, LikesCounter};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LikeService: Send + Sync {
    async fn like(&self, user_id: Uuid, recipe_id: i64) -> AppResult<Like>;

    async fn count(&self, recipe_id: i64) -> AppResult<LikesCounter>;

    async fn unlike(&self, user_id: Uuid, recipe_id: i64) -> AppResult<()>;
}

pub struct LikeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LikeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_recipe(&self, recipe_id: i64) -> AppResult<()> {
        if self.uow.recipes().exists(recipe_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Recipe", recipe_id))
        }
    }

    async fn ensure_user(&self, user_id: Uuid) -> AppResult<()> {
        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User", user_id)?;
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> LikeService for LikeManager<U> {
    async fn like(&self, user_id: Uuid, recipe_id: i64) -> AppResult<Like> {
        self.ensure_recipe(recipe_id).await?;
        self.ensure_user(user_id).await?;
        if self.uow.likes().find(user_id, recipe_id).await?.is_some() {
            return Err(AppError::LikeAlreadyExists { user_id, recipe_id });
        }

        let like = self.uow.likes().create(user_id, recipe_id).await?;
        tracing::info!(%user_id, recipe_id, "Liked recipe");
        Ok(like)
    }

    async fn count(&self, recipe_id: i64) -> AppResult<LikesCounter> {
        self.ensure_recipe(recipe_id).await?;
        let likes_counter = self.uow.likes().count_for_recipe(recipe_id).await?;
        Ok(LikesCounter { likes_counter })
    }

    async fn unlike(&self, user_id: Uuid, recipe_id: i64) -> AppResult<()> {
        if !self.uow.likes().delete(user_id, recipe_id).await? {
            return Err(AppError::LikeNotFound { user_id, recipe_id });
        }
        tracing::info!(%user_id, recipe_id, "Removed like");
        Ok(())
    }
}
