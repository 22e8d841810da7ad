//! Ingredient catalog repository.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::{ingredient, recipe_ingredient};
use crate::domain::{Ingredient, RecipeIngredient};
use crate::errors::{AppError, AppResult};
use crate::utils::contains_pattern;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// All ingredients ordered by name
    async fn list(&self) -> AppResult<Vec<Ingredient>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Ingredient>>;

    /// Case-insensitive exact name lookup
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Ingredient>>;

    /// Case-insensitive substring search on the name
    async fn search(&self, term: &str) -> AppResult<Vec<Ingredient>>;

    /// How many of `ids` exist. Callers pass distinct ids.
    async fn count_existing(&self, ids: Vec<i64>) -> AppResult<u64>;

    async fn create(&self, name: String) -> AppResult<Ingredient>;

    async fn rename(&self, id: i64, name: String) -> AppResult<Ingredient>;

    /// Ingredient lines of a recipe ordered by ingredient name
    async fn list_for_recipe(&self, recipe_id: i64) -> AppResult<Vec<RecipeIngredient>>;
}

pub struct IngredientStore {
    db: DatabaseConnection,
}

impl IngredientStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn lower_name() -> Expr {
    Expr::expr(Func::lower(Expr::col((
        ingredient::Entity,
        ingredient::Column::Name,
    ))))
}

/// Case-insensitive substring match on `ingredients.name`
pub(crate) fn name_contains(term: &str) -> SimpleExpr {
    lower_name().like(LikeExpr::new(contains_pattern(term)).escape('\\'))
}

#[async_trait]
impl IngredientRepository for IngredientStore {
    async fn list(&self) -> AppResult<Vec<Ingredient>> {
        let models = ingredient::Entity::find()
            .order_by_asc(ingredient::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Ingredient::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Ingredient>> {
        let model = ingredient::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Ingredient::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Ingredient>> {
        let model = ingredient::Entity::find()
            .filter(lower_name().eq(name.trim().to_lowercase()))
            .one(&self.db)
            .await?;
        Ok(model.map(Ingredient::from))
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Ingredient>> {
        let models = ingredient::Entity::find()
            .filter(name_contains(term))
            .order_by_asc(ingredient::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Ingredient::from).collect())
    }

    async fn count_existing(&self, ids: Vec<i64>) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let count = ingredient::Entity::find()
            .filter(ingredient::Column::Id.is_in(ids))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn create(&self, name: String) -> AppResult<Ingredient> {
        let model = ingredient::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(Ingredient::from(model))
    }

    async fn rename(&self, id: i64, name: String) -> AppResult<Ingredient> {
        let model = ingredient::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Ingredient", id))?;

        let mut active: ingredient::ActiveModel = model.into();
        active.name = Set(name);
        let model = active.update(&self.db).await?;
        Ok(Ingredient::from(model))
    }

    async fn list_for_recipe(&self, recipe_id: i64) -> AppResult<Vec<RecipeIngredient>> {
        let rows = recipe_ingredient::Entity::find()
            .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
            .find_also_related(ingredient::Entity)
            .order_by_asc(ingredient::Column::Name)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .filter_map(|(line, ingredient)| ingredient.map(|i| (line, i)))
            .map(|(line, ingredient)| recipe_ingredient::into_domain(line, ingredient))
            .collect()
    }
}
