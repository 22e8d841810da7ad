//! Recipe service - Authoring, feeds and search.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    AppRole, RecipeDraft, RecipeResponse, RecipeSearch, RecipeWithInteractions,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{CountedPagedResponse, PageRequest, PagedResponse};
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RecipeService: Send + Sync {
    async fn create(&self, author: Uuid, draft: RecipeDraft) -> AppResult<RecipeResponse>;

    async fn get(&self, viewer: Uuid, id: i64) -> AppResult<RecipeWithInteractions>;

    async fn list(
        &self,
        viewer: Uuid,
        page: PageRequest,
    ) -> AppResult<PagedResponse<RecipeWithInteractions>>;

    async fn list_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PagedResponse<RecipeWithInteractions>>;

    async fn list_liked_by(
        &self,
        viewer: Uuid,
        user_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PagedResponse<RecipeWithInteractions>>;

    async fn search(
        &self,
        viewer: Uuid,
        search: RecipeSearch,
        page: PageRequest,
    ) -> AppResult<CountedPagedResponse<RecipeWithInteractions>>;

    /// Replace a recipe. Only its author may do this.
    async fn update(&self, caller: Uuid, id: i64, draft: RecipeDraft)
        -> AppResult<RecipeResponse>;

    /// Delete a recipe. Allowed for its author and for admins.
    async fn delete(&self, caller: Uuid, role: AppRole, id: i64) -> AppResult<()>;
}

pub struct RecipeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RecipeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Writes by an account deleted after its token was issued are refused
    async fn ensure_user(&self, user_id: Uuid) -> AppResult<()> {
        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User", user_id)?;
        Ok(())
    }

    /// Deduplicate the draft and check that it references at least one
    /// ingredient and one tag, all of which exist.
    async fn validated(&self, draft: RecipeDraft) -> AppResult<RecipeDraft> {
        let draft = draft.deduplicated();

        let ingredient_ids = draft.ingredient_ids();
        if ingredient_ids.is_empty() {
            return Err(AppError::EmptyIngredientsList);
        }
        let expected = ingredient_ids.len() as u64;
        if self.uow.ingredients().count_existing(ingredient_ids).await? != expected {
            return Err(AppError::EmptyIngredientsList);
        }

        if draft.tag_ids.is_empty() {
            return Err(AppError::EmptyTagsList);
        }
        let expected = draft.tag_ids.len() as u64;
        if self.uow.tags().count_existing(draft.tag_ids.clone()).await? != expected {
            return Err(AppError::EmptyTagsList);
        }

        Ok(draft)
    }
}

#[async_trait]
impl<U: UnitOfWork> RecipeService for RecipeManager<U> {
    async fn create(&self, author: Uuid, draft: RecipeDraft) -> AppResult<RecipeResponse> {
        let draft = self.validated(draft).await?;
        self.ensure_user(author).await?;

        let details = with_transaction!(self.uow, |ctx| {
            let recipes = ctx.recipes();
            let id = recipes.insert(author, &draft).await?;
            recipes.details(id).await
        })?;

        tracing::info!(recipe_id = details.recipe.id, %author, "Created new recipe");
        Ok(RecipeResponse::from(details))
    }

    async fn get(&self, viewer: Uuid, id: i64) -> AppResult<RecipeWithInteractions> {
        let overview = self
            .uow
            .recipes()
            .find_overview(viewer, id)
            .await?
            .ok_or_not_found("Recipe", id)?;
        Ok(RecipeWithInteractions::from(overview))
    }

    async fn list(
        &self,
        viewer: Uuid,
        page: PageRequest,
    ) -> AppResult<PagedResponse<RecipeWithInteractions>> {
        let rows = self.uow.recipes().list(viewer, page).await?;
        Ok(PagedResponse::from_page(rows, &page))
    }

    async fn list_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PagedResponse<RecipeWithInteractions>> {
        let rows = self
            .uow
            .recipes()
            .list_by_author(viewer, author_id, page)
            .await?;
        Ok(PagedResponse::from_page(rows, &page))
    }

    async fn list_liked_by(
        &self,
        viewer: Uuid,
        user_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PagedResponse<RecipeWithInteractions>> {
        let rows = self
            .uow
            .recipes()
            .list_liked_by(viewer, user_id, page)
            .await?;
        Ok(PagedResponse::from_page(rows, &page))
    }

    async fn search(
        &self,
        viewer: Uuid,
        search: RecipeSearch,
        page: PageRequest,
    ) -> AppResult<CountedPagedResponse<RecipeWithInteractions>> {
        let rows = self.uow.recipes().search(viewer, search, page).await?;
        let elements = rows
            .items
            .into_iter()
            .map(RecipeWithInteractions::from)
            .collect();
        Ok(CountedPagedResponse::new(elements, &page, rows.total))
    }

    async fn update(
        &self,
        caller: Uuid,
        id: i64,
        draft: RecipeDraft,
    ) -> AppResult<RecipeResponse> {
        let existing = self
            .uow
            .recipes()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Recipe", id)?;
        if existing.recipe.user_id != Some(caller) {
            return Err(AppError::Forbidden);
        }

        let draft = self.validated(draft).await?;
        let details = with_transaction!(self.uow, |ctx| {
            let recipes = ctx.recipes();
            recipes.replace(id, &draft).await?;
            recipes.details(id).await
        })?;

        tracing::info!(recipe_id = id, "Updated recipe");
        Ok(RecipeResponse::from(details))
    }

    async fn delete(&self, caller: Uuid, role: AppRole, id: i64) -> AppResult<()> {
        let existing = self
            .uow
            .recipes()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Recipe", id)?;
        if existing.recipe.user_id != Some(caller) && !role.is_admin() {
            return Err(AppError::Forbidden);
        }

        if !self.uow.recipes().delete(id).await? {
            return Err(AppError::not_found("Recipe", id));
        }
        tracing::info!(recipe_id = id, "Deleted recipe");
        Ok(())
    }
}
