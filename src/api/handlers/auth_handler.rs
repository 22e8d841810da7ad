//! Authentication handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{delete, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::AppRole;
use crate::errors::{AppResult, ErrorResponse};
use crate::services::{AuthResponse, Registration};
use crate::types::NoContent;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "First name must be between 3 and 50 characters"))]
    #[schema(example = "Becca")]
    pub first_name: String,
    #[validate(length(min = 3, max = 50, message = "Last name must be between 3 and 50 characters"))]
    #[schema(example = "Richards")]
    pub last_name: String,
    #[schema(example = "1994-05-17")]
    pub birthday: NaiveDate,
    pub picture_url: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "richards_becca@example.com")]
    pub email: String,
    #[validate(length(min = 10, message = "Password must be at least 10 characters"))]
    #[schema(example = "SecurePass123!", min_length = 10)]
    pub password: String,
    /// 1 = User, 2 = Chef. Defaults to User.
    #[schema(value_type = Option<i32>, example = 1)]
    pub role: Option<AppRole>,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "richards_becca@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Authentication routes that need a signed-in caller
pub fn account_routes() -> Router<AppState> {
    Router::new().route("/delete", delete(delete_account))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered and signed in", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let auth = state
        .services
        .auth()
        .register(Registration {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password: payload.password,
            birthday: payload.birthday,
            picture_url: payload.picture_url,
            role: payload.role,
        })
        .await?;

    Ok(Json(auth))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let auth = state
        .services
        .auth()
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(auth))
}

/// Delete the caller's account
#[utoipa::path(
    delete,
    path = "/api/auth/delete",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse)
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<NoContent> {
    state.services.auth().delete_account(user.id).await?;
    Ok(NoContent)
}
