//! Comment handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{Path, ValidatedJson, ValidatedQuery};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::CommentResponse;
use crate::errors::{AppResult, ErrorResponse};
use crate::types::{Created, NoContent, PageRequest, PagedComments};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub recipe_id: i64,
    #[validate(length(min = 1, max = 1000, message = "Text must be between 1 and 1000 characters"))]
    #[schema(example = "Made this twice already!")]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentRequest {
    /// Comment id
    pub id: i64,
    #[validate(length(min = 1, max = 1000, message = "Text must be between 1 and 1000 characters"))]
    pub text: String,
}

/// Create comment routes
pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_comment).put(update_comment))
        .route("/:id", get(list_comments).delete(delete_comment))
}

/// Comment on a recipe
#[utoipa::path(
    post,
    path = "/api/comments",
    tag = "Comments",
    security(("bearer_auth" = [])),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn create_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> AppResult<Created<CommentResponse>> {
    let comment = state
        .services
        .comments()
        .create(user.id, payload.recipe_id, payload.text)
        .await?;
    Ok(Created(comment))
}

/// Comments of a recipe, newest first
#[utoipa::path(
    get,
    path = "/api/comments/{id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Recipe id"), PageRequest),
    responses(
        (status = 200, description = "Comments", body = PagedComments),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(recipe_id): Path<i64>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> AppResult<Json<PagedComments>> {
    let comments = state.services.comments().list(recipe_id, page).await?;
    Ok(Json(comments))
}

/// Edit a comment (author only)
#[utoipa::path(
    put,
    path = "/api/comments",
    tag = "Comments",
    security(("bearer_auth" = [])),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse)
    )
)]
pub async fn update_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateCommentRequest>,
) -> AppResult<Json<CommentResponse>> {
    let comment = state
        .services
        .comments()
        .update(user.id, payload.id, payload.text)
        .await?;
    Ok(Json(comment))
}

/// Delete a comment (author or Admin)
#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Not allowed", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse)
    )
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    state
        .services
        .comments()
        .delete(user.id, user.role, id)
        .await?;
    Ok(NoContent)
}
