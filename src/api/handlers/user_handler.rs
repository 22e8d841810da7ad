//! User profile and administration handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{AppRole, ProfileUpdate, UserResponse, UserWithInteractions};
use crate::errors::{AppResult, ErrorResponse};
use crate::types::{CountedUsers, PageRequest};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    /// Size of the activity window in days
    #[validate(range(min = 1, max = 3650, message = "Days number must be between 1 and 3650"))]
    #[param(minimum = 1, example = 30)]
    pub days_number: u32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleRequest {
    pub user_id: Uuid,
    /// 0 = Admin, 1 = User, 2 = Chef
    #[schema(value_type = i32, example = 2)]
    pub role: AppRole,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 50, message = "First name must be between 3 and 50 characters"))]
    pub first_name: String,
    #[validate(length(min = 3, max = 50, message = "Last name must be between 3 and 50 characters"))]
    pub last_name: String,
    #[schema(example = "1994-05-17")]
    pub birthday: NaiveDate,
    pub picture_url: Option<String>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", put(update_profile))
        .route("/current", get(current_user))
        .route("/activity", get(activity))
        .route("/changeRole", put(change_role))
}

/// Get the caller's profile with counters
#[utoipa::path(
    get,
    path = "/api/users/current",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserWithInteractions),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse)
    )
)]
pub async fn current_user(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<UserWithInteractions>> {
    let profile = state.services.users().current(user.id).await?;
    Ok(Json(profile))
}

/// Rank non-admin users by likes received in a recent window (Admin only)
#[utoipa::path(
    get,
    path = "/api/users/activity",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ActivityQuery, PageRequest),
    responses(
        (status = 200, description = "User activity", body = CountedUsers),
        (status = 403, description = "Admin only", body = ErrorResponse)
    )
)]
pub async fn activity(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedQuery(query): ValidatedQuery<ActivityQuery>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> AppResult<Json<CountedUsers>> {
    require_admin(&user)?;

    let report = state
        .services
        .users()
        .activity(query.days_number, page)
        .await?;
    Ok(Json(report))
}

/// Change a user's role (Admin only)
#[utoipa::path(
    put,
    path = "/api/users/changeRole",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = ChangeRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = UserResponse),
        (status = 403, description = "Admin only", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn change_role(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<ChangeRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&user)?;

    let updated = state
        .services
        .users()
        .change_role(payload.user_id, payload.role)
        .await?;
    Ok(Json(updated))
}

/// Update the caller's profile
#[utoipa::path(
    put,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let updated = state
        .services
        .users()
        .update_profile(
            user.id,
            ProfileUpdate {
                first_name: payload.first_name.trim().to_string(),
                last_name: payload.last_name.trim().to_string(),
                birthday: payload.birthday,
                picture_url: payload.picture_url,
            },
        )
        .await?;
    Ok(Json(updated))
}
