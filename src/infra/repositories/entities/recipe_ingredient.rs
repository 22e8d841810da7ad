//! Join table between recipes and ingredients, carrying the quantity.

use sea_orm::entity::prelude::*;

use super::decode;
use crate::domain::{Ingredient, RecipeIngredient};
use crate::errors::AppResult;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recipe_ingredients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub recipe_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub ingredient_id: i64,
    pub quantity: f64,
    pub quantity_type: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recipe::Entity",
        from = "Column::RecipeId",
        to = "super::recipe::Column::Id",
        on_delete = "Cascade"
    )]
    Recipe,
    #[sea_orm(
        belongs_to = "super::ingredient::Entity",
        from = "Column::IngredientId",
        to = "super::ingredient::Column::Id",
        on_delete = "Cascade"
    )]
    Ingredient,
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipe.def()
    }
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Join a line with its ingredient row
pub(crate) fn into_domain(
    line: Model,
    ingredient: super::ingredient::Model,
) -> AppResult<RecipeIngredient> {
    Ok(RecipeIngredient {
        ingredient: Ingredient::from(ingredient),
        quantity: line.quantity,
        quantity_type: decode("recipe_ingredients.quantity_type", line.quantity_type)?,
    })
}
