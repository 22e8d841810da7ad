//! Comment service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{AppRole, CommentResponse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{PageRequest, PagedResponse};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CommentService: Send + Sync {
    async fn create(&self, user_id: Uuid, recipe_id: i64, text: String)
        -> AppResult<CommentResponse>;

    /// Comments of a recipe, newest first
    async fn list(
        &self,
        recipe_id: i64,
        page: PageRequest,
    ) -> AppResult<PagedResponse<CommentResponse>>;

    /// Edit a comment. Only its author may do this.
    async fn update(&self, caller: Uuid, id: i64, text: String) -> AppResult<CommentResponse>;

    /// Delete a comment. Allowed for its author and for admins.
    async fn delete(&self, caller: Uuid, role: AppRole, id: i64) -> AppResult<()>;
}

pub struct CommentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CommentManager<U> {
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
impl<U: UnitOfWork> CommentService for CommentManager<U> {
    async fn create(
        &self,
        user_id: Uuid,
        recipe_id: i64,
        text: String,
    ) -> AppResult<CommentResponse> {
        self.ensure_recipe(recipe_id).await?;
        self.ensure_user(user_id).await?;
        let comment = self.uow.comments().create(user_id, recipe_id, text).await?;
        tracing::info!(comment_id = comment.comment.id, recipe_id, "Created new comment");
        Ok(CommentResponse::from(comment))
    }

    async fn list(
        &self,
        recipe_id: i64,
        page: PageRequest,
    ) -> AppResult<PagedResponse<CommentResponse>> {
        self.ensure_recipe(recipe_id).await?;
        let rows = self.uow.comments().list_for_recipe(recipe_id, page).await?;
        Ok(PagedResponse::from_page(rows, &page))
    }

    async fn update(&self, caller: Uuid, id: i64, text: String) -> AppResult<CommentResponse> {
        let existing = self
            .uow
            .comments()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Comment", id)?;
        if !existing.comment.is_written_by(caller) {
            return Err(AppError::Forbidden);
        }

        let comment = self.uow.comments().update_text(id, text).await?;
        tracing::info!(comment_id = id, "Updated comment");
        Ok(CommentResponse::from(comment))
    }

    async fn delete(&self, caller: Uuid, role: AppRole, id: i64) -> AppResult<()> {
        let existing = self
            .uow
            .comments()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Comment", id)?;
        if !existing.comment.is_written_by(caller) && !role.is_admin() {
            return Err(AppError::Forbidden);
        }

        if !self.uow.comments().delete(id).await? {
            return Err(AppError::not_found("Comment", id));
        }
        tracing::info!(comment_id = id, "Deleted comment");
        Ok(())
    }
}
