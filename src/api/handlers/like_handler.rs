//! Like handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{Path, ValidatedJson};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Like, LikesCounter};
use crate::errors::{AppResult, ErrorResponse};
use crate::types::{Created, NoContent};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub recipe_id: i64,
}

/// Create like routes
pub fn like_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(like_recipe))
        .route("/:recipe_id", get(count_likes).delete(unlike_recipe))
}

/// Like a recipe
#[utoipa::path(
    post,
    path = "/api/likes",
    tag = "Likes",
    security(("bearer_auth" = [])),
    request_body = LikeRequest,
    responses(
        (status = 201, description = "Recipe liked", body = Like),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Already liked", body = ErrorResponse)
    )
)]
pub async fn like_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<LikeRequest>,
) -> AppResult<Created<Like>> {
    let like = state
        .services
        .likes()
        .like(user.id, payload.recipe_id)
        .await?;
    Ok(Created(like))
}

/// Number of likes on a recipe
#[utoipa::path(
    get,
    path = "/api/likes/{recipe_id}",
    tag = "Likes",
    security(("bearer_auth" = [])),
    params(("recipe_id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Like count", body = LikesCounter),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn count_likes(
    State(state): State<AppState>,
    Path(recipe_id): Path<i64>,
) -> AppResult<Json<LikesCounter>> {
    let counter = state.services.likes().count(recipe_id).await?;
    Ok(Json(counter))
}

/// Remove the caller's like
#[utoipa::path(
    delete,
    path = "/api/likes/{recipe_id}",
    tag = "Likes",
    security(("bearer_auth" = [])),
    params(("recipe_id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Like removed"),
        (status = 404, description = "Like not found", body = ErrorResponse)
    )
)]
pub async fn unlike_recipe(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(recipe_id): Path<i64>,
) -> AppResult<NoContent> {
    state.services.likes().unlike(user.id, recipe_id).await?;
    Ok(NoContent)
}
