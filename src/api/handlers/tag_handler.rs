//! Tag catalog handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::ingredient_handler::NameQuery;
use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::AppState;
use crate::domain::{Tag, TagType};
use crate::errors::{AppResult, ErrorResponse};
use crate::types::Created;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TagRequest {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    #[schema(example = "Dessert")]
    pub name: String,
    /// 1 = Course, 2 = Cuisine, 3 = CookingMethod, 4 = DietaryPreference
    #[serde(rename = "type")]
    #[schema(value_type = i32, example = 1)]
    pub tag_type: TagType,
}

/// Create tag routes
pub fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags).post(create_tag))
        .route("/filter", get(filter_tags))
        .route("/search", get(search_tags))
}

/// Create a tag
#[utoipa::path(
    post,
    path = "/api/tags",
    tag = "Tags",
    security(("bearer_auth" = [])),
    request_body = TagRequest,
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 409, description = "Similar name exists", body = ErrorResponse)
    )
)]
pub async fn create_tag(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TagRequest>,
) -> AppResult<Created<Tag>> {
    let tag = state
        .services
        .tags()
        .create(payload.name, payload.tag_type)
        .await?;
    Ok(Created(tag))
}

/// List all tags
#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "Tags",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Tags", body = Vec<Tag>))
)]
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    let tags = state.services.tags().list().await?;
    Ok(Json(tags))
}

/// Tags offered as search filters (courses and dietary preferences)
#[utoipa::path(
    get,
    path = "/api/tags/filter",
    tag = "Tags",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Filter tags", body = Vec<Tag>))
)]
pub async fn filter_tags(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    let tags = state.services.tags().filter().await?;
    Ok(Json(tags))
}

/// Search tags by name
#[utoipa::path(
    get,
    path = "/api/tags/search",
    tag = "Tags",
    security(("bearer_auth" = [])),
    params(NameQuery),
    responses((status = 200, description = "Matching tags", body = Vec<Tag>))
)]
pub async fn search_tags(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<NameQuery>,
) -> AppResult<Json<Vec<Tag>>> {
    let tags = state.services.tags().search(query.name).await?;
    Ok(Json(tags))
}
