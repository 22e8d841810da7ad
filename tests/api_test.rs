//! Router-level tests over mocked services.
//!
//! Requests go through the full middleware stack via `oneshot`; no database
//! or file system is touched.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use mockall::predicate::eq;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use sharespoon::api::create_router;
use sharespoon::domain::{DifficultyLevel, Like};
use sharespoon::errors::AppError;
use sharespoon::infra::Database;
use sharespoon::services::{
    Claims, MockAuthService, MockFileService, MockLikeService, MockRecipeService,
    MockServiceContainer,
};
use sharespoon::types::CountedPagedResponse;
use sharespoon::{AppRole, AppState, Config};

const TOKEN: &str = "Bearer test-token";

fn claims(user_id: Uuid, role: AppRole) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        sub: "becca@example.com".to_string(),
        jti: Uuid::new_v4(),
        email: "becca@example.com".to_string(),
        uid: user_id,
        role,
        iss: "ShareSpoon".to_string(),
        aud: "ShareSpoon".to_string(),
        iat: now,
        exp: now + 3600,
    }
}

/// Container whose auth service accepts any token as `user_id` with `role`
fn signed_in(user_id: Uuid, role: AppRole) -> MockServiceContainer {
    let mut auth = MockAuthService::new();
    auth.expect_verify_token()
        .returning(move |_| Ok(claims(user_id, role)));
    let auth = Arc::new(auth);

    let mut services = MockServiceContainer::new();
    services
        .expect_auth()
        .returning(move || auth.clone());
    services
}

fn app(services: MockServiceContainer) -> Router {
    create_router(AppState::new(Arc::new(services), Config::default()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, TOKEN)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, TOKEN)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root() {
    let response = app(MockServiceContainer::new())
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Welcome to ShareSpoon API");
}

#[tokio::test]
async fn test_health_without_database() {
    let response = app(MockServiceContainer::new())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_health_with_database() {
    let connection = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let state = AppState::new(Arc::new(MockServiceContainer::new()), Config::default())
        .with_database(Arc::new(Database::from_connection(connection)));

    let response = create_router(state)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let response = app(MockServiceContainer::new())
        .oneshot(Request::get("/api/recipes").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_rejected_token_is_unauthorized() {
    let mut auth = MockAuthService::new();
    auth.expect_verify_token()
        .returning(|_| Err(AppError::Unauthorized));
    let auth = Arc::new(auth);
    let mut services = MockServiceContainer::new();
    services.expect_auth().returning(move || auth.clone());

    let response = app(services).oneshot(get("/api/tags")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_activity_is_admin_only() {
    let services = signed_in(Uuid::new_v4(), AppRole::Chef);

    let response = app(services)
        .oneshot(get("/api/users/activity?daysNumber=7"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_recipe_error_body() {
    let mut recipes = MockRecipeService::new();
    recipes
        .expect_get()
        .with(mockall::predicate::always(), eq(7))
        .returning(|_, id| Err(AppError::not_found("Recipe", id)));
    let recipes = Arc::new(recipes);

    let mut services = signed_in(Uuid::new_v4(), AppRole::User);
    services
        .expect_recipes()
        .returning(move || recipes.clone());

    let response = app(services).oneshot(get("/api/recipes/7")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "The Recipe with id 7 was not found.");
}

#[tokio::test]
async fn test_register_validation() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({
                "firstName": "Becca",
                "lastName": "Richards",
                "birthday": "1994-05-17",
                "email": "not-an-email",
                "password": "short"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app(MockServiceContainer::new())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Invalid email format"));
    assert!(message.contains("Password must be at least 10 characters"));
}

#[tokio::test]
async fn test_search_passes_repeated_filters() {
    let viewer = Uuid::new_v4();

    let mut recipes = MockRecipeService::new();
    recipes
        .expect_search()
        .withf(move |caller, search, page| {
            *caller == viewer
                && search.difficulties == vec![DifficultyLevel::Easy, DifficultyLevel::Hard]
                && search.tag_ids == vec![3_i64]
                && search.promoted_users
                && page.page_size == 5
        })
        .times(1)
        .returning(|_, _, page| Ok(CountedPagedResponse::new(vec![], &page, 0)));
    let recipes = Arc::new(recipes);

    let mut services = signed_in(viewer, AppRole::User);
    services
        .expect_recipes()
        .returning(move || recipes.clone());

    let response = app(services)
        .oneshot(get(
            "/api/recipes/search?difficulties=1&difficulties=3&tagIds=3&promotedUsers=true&pageSize=5",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["resultsCount"], 0);
    assert_eq!(body["elements"], serde_json::json!([]));
}

#[tokio::test]
async fn test_page_size_out_of_range() {
    let services = signed_in(Uuid::new_v4(), AppRole::User);

    let response = app(services)
        .oneshot(get("/api/recipes?pageSize=500"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_like_recipe_created() {
    let user_id = Uuid::new_v4();

    let mut likes = MockLikeService::new();
    likes
        .expect_like()
        .with(eq(user_id), eq(12))
        .returning(|user_id, recipe_id| {
            Ok(Like {
                id: 1,
                user_id: Some(user_id),
                recipe_id,
                created_at: Utc::now(),
            })
        });
    let likes = Arc::new(likes);

    let mut services = signed_in(user_id, AppRole::User);
    services.expect_likes().returning(move || likes.clone());

    let response = app(services)
        .oneshot(post_json("/api/likes", serde_json::json!({ "recipeId": 12 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["recipeId"], 12);
}

#[tokio::test]
async fn test_upload_rejects_unsupported_format() {
    let mut files = MockFileService::new();
    files
        .expect_upload()
        .withf(|name, _| name == "notes.txt")
        .returning(|_, _| Err(AppError::InvalidImageFormat));
    let files = Arc::new(files);

    let mut services = signed_in(Uuid::new_v4(), AppRole::User);
    services.expect_files().returning(move || files.clone());

    let boundary = "sharespoon-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
         Content-Type: text/plain\r\n\r\nhello\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/files/upload")
        .header(header::AUTHORIZATION, TOKEN)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app(services).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "INVALID_IMAGE_FORMAT");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let response = app(MockServiceContainer::new())
        .oneshot(
            Request::get("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["paths"]["/api/recipes/search"].is_object());
}
