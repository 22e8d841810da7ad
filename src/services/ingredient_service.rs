//! Ingredient catalog service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Ingredient, RecipeIngredientResponse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::utils::normalize_name;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IngredientService: Send + Sync {
    async fn create(&self, name: String) -> AppResult<Ingredient>;

    async fn list(&self) -> AppResult<Vec<Ingredient>>;

    /// Ingredient lines of a recipe with their quantities
    async fn for_recipe(&self, recipe_id: i64) -> AppResult<Vec<RecipeIngredientResponse>>;

    /// Case-insensitive name search. A blank term lists everything.
    async fn search(&self, term: String) -> AppResult<Vec<Ingredient>>;

    async fn update(&self, id: i64, name: String) -> AppResult<Ingredient>;
}

pub struct IngredientManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> IngredientManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Normalize and reject names already used by another ingredient
    async fn available_name(&self, name: &str, own_id: Option<i64>) -> AppResult<String> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }

        match self.uow.ingredients().find_by_name(&name).await? {
            Some(existing) if Some(existing.id) != own_id => {
                Err(AppError::EntityAlreadyExists("Ingredient"))
            }
            _ => Ok(name),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> IngredientService for IngredientManager<U> {
    async fn create(&self, name: String) -> AppResult<Ingredient> {
        let name = self.available_name(&name, None).await?;
        let ingredient = self.uow.ingredients().create(name).await?;
        tracing::info!(ingredient_id = ingredient.id, "Created new ingredient");
        Ok(ingredient)
    }

    async fn list(&self) -> AppResult<Vec<Ingredient>> {
        self.uow.ingredients().list().await
    }

    async fn for_recipe(&self, recipe_id: i64) -> AppResult<Vec<RecipeIngredientResponse>> {
        if !self.uow.recipes().exists(recipe_id).await? {
            return Err(AppError::not_found("Recipe", recipe_id));
        }

        let lines = self.uow.ingredients().list_for_recipe(recipe_id).await?;
        Ok(lines.into_iter().map(RecipeIngredientResponse::from).collect())
    }

    async fn search(&self, term: String) -> AppResult<Vec<Ingredient>> {
        if term.trim().is_empty() {
            return self.uow.ingredients().list().await;
        }
        self.uow.ingredients().search(&term).await
    }

    async fn update(&self, id: i64, name: String) -> AppResult<Ingredient> {
        self.uow
            .ingredients()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Ingredient", id)?;

        let name = self.available_name(&name, Some(id)).await?;
        let ingredient = self.uow.ingredients().rename(id, name).await?;
        tracing::info!(ingredient_id = id, "Updated ingredient");
        Ok(ingredient)
    }
}
