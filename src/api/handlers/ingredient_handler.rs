//! Ingredient catalog handlers.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{Path, ValidatedJson, ValidatedQuery};
use crate::api::AppState;
use crate::domain::{Ingredient, RecipeIngredientResponse};
use crate::errors::{AppResult, ErrorResponse};
use crate::types::Created;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IngredientRequest {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    #[schema(example = "Banana")]
    pub name: String,
}

/// Name search shared by the ingredient and tag catalogs
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Case-insensitive part of the name
    #[serde(default)]
    pub name: String,
}

/// Create ingredient routes
pub fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ingredients).post(create_ingredient))
        .route("/search", get(search_ingredients))
        .route("/:id", get(recipe_ingredients).put(update_ingredient))
}

/// Create an ingredient
#[utoipa::path(
    post,
    path = "/api/ingredients",
    tag = "Ingredients",
    security(("bearer_auth" = [])),
    request_body = IngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = Ingredient),
        (status = 409, description = "Similar name exists", body = ErrorResponse)
    )
)]
pub async fn create_ingredient(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<IngredientRequest>,
) -> AppResult<Created<Ingredient>> {
    let ingredient = state.services.ingredients().create(payload.name).await?;
    Ok(Created(ingredient))
}

/// List all ingredients by name
#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "Ingredients",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Ingredients", body = Vec<Ingredient>))
)]
pub async fn list_ingredients(State(state): State<AppState>) -> AppResult<Json<Vec<Ingredient>>> {
    let ingredients = state.services.ingredients().list().await?;
    Ok(Json(ingredients))
}

/// Ingredient lines of a recipe
#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    tag = "Ingredients",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Ingredient lines", body = Vec<RecipeIngredientResponse>),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn recipe_ingredients(
    State(state): State<AppState>,
    Path(recipe_id): Path<i64>,
) -> AppResult<Json<Vec<RecipeIngredientResponse>>> {
    let lines = state.services.ingredients().for_recipe(recipe_id).await?;
    Ok(Json(lines))
}

/// Search ingredients by name
#[utoipa::path(
    get,
    path = "/api/ingredients/search",
    tag = "Ingredients",
    security(("bearer_auth" = [])),
    params(NameQuery),
    responses((status = 200, description = "Matching ingredients", body = Vec<Ingredient>))
)]
pub async fn search_ingredients(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<NameQuery>,
) -> AppResult<Json<Vec<Ingredient>>> {
    let ingredients = state.services.ingredients().search(query.name).await?;
    Ok(Json(ingredients))
}

/// Rename an ingredient
#[utoipa::path(
    put,
    path = "/api/ingredients/{id}",
    tag = "Ingredients",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Ingredient id")),
    request_body = IngredientRequest,
    responses(
        (status = 200, description = "Ingredient updated", body = Ingredient),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 409, description = "Similar name exists", body = ErrorResponse)
    )
)]
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<IngredientRequest>,
) -> AppResult<Json<Ingredient>> {
    let ingredient = state
        .services
        .ingredients()
        .update(id, payload.name)
        .await?;
    Ok(Json(ingredient))
}
