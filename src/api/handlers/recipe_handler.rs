//! Recipe handlers.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{Path, ValidatedJson, ValidatedQuery};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{
    DifficultyLevel, EstimatedTime, IngredientLine, QuantityType, RecipeDraft, RecipeResponse,
    RecipeSearch, RecipeWithInteractions,
};
use crate::errors::{AppResult, ErrorResponse};
use crate::types::{CountedRecipes, Created, NoContent, PageRequest, PagedRecipes};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientRequest {
    /// Ingredient id
    pub id: i64,
    #[validate(range(min = 0.1, message = "Quantity must be at least 0.1"))]
    #[schema(example = 250.0)]
    pub quantity: f64,
    /// 1 = Grams ... 10 = NoType
    #[schema(value_type = i32, example = 1)]
    pub quantity_type: QuantityType,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecipeTagRequest {
    /// Tag id
    pub id: i64,
}

/// Body of recipe create and update
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    #[schema(example = "Banana Bread")]
    pub name: String,
    #[validate(length(min = 1, max = 3000, message = "Description must be between 1 and 3000 characters"))]
    pub description: String,
    #[schema(value_type = String, example = "01:20:00")]
    pub estimated_time: EstimatedTime,
    /// 1 = Easy, 2 = Medium, 3 = Hard
    #[schema(value_type = i32, example = 2)]
    pub difficulty: DifficultyLevel,
    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<RecipeIngredientRequest>,
    #[serde(default)]
    pub tags: Vec<RecipeTagRequest>,
    pub picture_url: Option<String>,
}

impl From<RecipeRequest> for RecipeDraft {
    fn from(request: RecipeRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            description: request.description,
            estimated_time: request.estimated_time,
            difficulty: request.difficulty,
            picture_url: request.picture_url,
            ingredients: request
                .ingredients
                .into_iter()
                .map(|line| IngredientLine {
                    ingredient_id: line.id,
                    quantity: line.quantity,
                    quantity_type: line.quantity_type,
                })
                .collect(),
            tag_ids: request.tags.into_iter().map(|tag| tag.id).collect(),
        }
    }
}

/// Recipe search filters. Repeat a key to pass several values.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RecipeSearchQuery {
    /// Matches recipe, ingredient and tag names
    pub input: Option<String>,
    /// Only recipes by promoted users (Chef)
    #[serde(default)]
    pub promoted_users: bool,
    #[serde(default)]
    #[param(value_type = Option<Vec<i32>>)]
    pub difficulties: Vec<DifficultyLevel>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

impl From<RecipeSearchQuery> for RecipeSearch {
    fn from(query: RecipeSearchQuery) -> Self {
        Self {
            input: query.input,
            promoted_users: query.promoted_users,
            difficulties: query.difficulties,
            tag_ids: query.tag_ids,
        }
    }
}

/// Create recipe routes
pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route("/search", get(search_recipes))
        .route("/user/:user_id", get(list_user_recipes))
        .route("/user/:user_id/liked", get(list_liked_recipes))
        .route(
            "/:id",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
}

/// Create a recipe authored by the caller
#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Validation error or unknown ingredients/tags", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<RecipeRequest>,
) -> AppResult<Created<RecipeResponse>> {
    let recipe = state
        .services
        .recipes()
        .create(user.id, payload.into())
        .await?;
    Ok(Created(recipe))
}

/// List all recipes, newest first
#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    params(PageRequest),
    responses((status = 200, description = "Recipes", body = PagedRecipes))
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> AppResult<Json<PagedRecipes>> {
    let recipes = state.services.recipes().list(user.id, page).await?;
    Ok(Json(recipes))
}

/// Get one recipe with its counters
#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeWithInteractions),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<RecipeWithInteractions>> {
    let recipe = state.services.recipes().get(user.id, id).await?;
    Ok(Json(recipe))
}

/// Recipes authored by a user
#[utoipa::path(
    get,
    path = "/api/recipes/user/{user_id}",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "Author id"), PageRequest),
    responses((status = 200, description = "Recipes", body = PagedRecipes))
)]
pub async fn list_user_recipes(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(user_id): Path<Uuid>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> AppResult<Json<PagedRecipes>> {
    let recipes = state
        .services
        .recipes()
        .list_by_author(user.id, user_id, page)
        .await?;
    Ok(Json(recipes))
}

/// Recipes liked by a user
#[utoipa::path(
    get,
    path = "/api/recipes/user/{user_id}/liked",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "User id"), PageRequest),
    responses((status = 200, description = "Recipes", body = PagedRecipes))
)]
pub async fn list_liked_recipes(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(user_id): Path<Uuid>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> AppResult<Json<PagedRecipes>> {
    let recipes = state
        .services
        .recipes()
        .list_liked_by(user.id, user_id, page)
        .await?;
    Ok(Json(recipes))
}

/// Search recipes
#[utoipa::path(
    get,
    path = "/api/recipes/search",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    params(RecipeSearchQuery, PageRequest),
    responses((status = 200, description = "Matching recipes", body = CountedRecipes))
)]
pub async fn search_recipes(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedQuery(query): ValidatedQuery<RecipeSearchQuery>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> AppResult<Json<CountedRecipes>> {
    let recipes = state
        .services
        .recipes()
        .search(user.id, query.into(), page)
        .await?;
    Ok(Json(recipes))
}

/// Replace a recipe (author only)
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<RecipeRequest>,
) -> AppResult<Json<RecipeResponse>> {
    let recipe = state
        .services
        .recipes()
        .update(user.id, id, payload.into())
        .await?;
    Ok(Json(recipe))
}

/// Delete a recipe (author or Admin)
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 403, description = "Not allowed", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    state
        .services
        .recipes()
        .delete(user.id, user.role, id)
        .await?;
    Ok(NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_maps_to_draft() {
        let request: RecipeRequest = serde_json::from_value(serde_json::json!({
            "name": "  Banana Bread ",
            "description": "Moist and easy",
            "estimatedTime": "01:05:00",
            "difficulty": 2,
            "ingredients": [{ "id": 4, "quantity": 2.0, "quantityType": 5 }],
            "tags": [{ "id": 9 }]
        }))
        .unwrap();

        let draft = RecipeDraft::from(request);
        assert_eq!(draft.name, "Banana Bread");
        assert_eq!(draft.estimated_time.as_seconds(), 3900);
        assert_eq!(draft.ingredient_ids(), vec![4]);
        assert_eq!(draft.ingredients[0].quantity_type, QuantityType::Pieces);
        assert_eq!(draft.tag_ids, vec![9]);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let request: RecipeRequest = serde_json::from_value(serde_json::json!({
            "name": "Toast",
            "description": "Bread, heated",
            "estimatedTime": "00:05:00",
            "difficulty": 1
        }))
        .unwrap();

        assert!(request.ingredients.is_empty());
        assert!(request.tags.is_empty());
    }

    #[test]
    fn test_quantity_below_minimum_is_rejected() {
        let request: RecipeRequest = serde_json::from_value(serde_json::json!({
            "name": "Toast",
            "description": "Bread, heated",
            "estimatedTime": "00:05:00",
            "difficulty": 1,
            "ingredients": [{ "id": 1, "quantity": 0.0, "quantityType": 10 }]
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_difficulty_fails_to_parse() {
        let parsed = serde_json::from_value::<RecipeRequest>(serde_json::json!({
            "name": "Toast",
            "description": "Bread, heated",
            "estimatedTime": "00:05:00",
            "difficulty": 9
        }));
        assert!(parsed.is_err());
    }
}
