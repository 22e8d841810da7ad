//! Application route configuration.

use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    account_routes, auth_routes, comment_routes, file_routes, ingredient_routes, like_routes,
    recipe_routes, tag_routes, user_routes,
};
use super::middleware::{auth_middleware, timing_middleware};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::Config;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();
    let authenticated = |router: Router<AppState>| {
        router.route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
    };

    let api = Router::new()
        .nest(
            "/auth",
            auth_routes().merge(authenticated(account_routes())),
        )
        .nest("/users", authenticated(user_routes()))
        .nest("/recipes", authenticated(recipe_routes()))
        .nest("/ingredients", authenticated(ingredient_routes()))
        .nest("/tags", authenticated(tag_routes()))
        .nest("/likes", authenticated(like_routes()))
        .nest("/comments", authenticated(comment_routes()))
        .nest(
            "/files",
            authenticated(file_routes(config.max_upload_bytes)),
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        // Uploaded images, read-only
        .nest_service(
            &format!("/{}", config.storage_container),
            ServeDir::new(config.storage_dir.join(&config.storage_container)),
        )
        .layer(middleware::from_fn(timing_middleware))
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Allow the web client's origin
fn cors_layer(config: &Config) -> CorsLayer {
    let origin = match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(_) => {
            tracing::warn!(
                origin = %config.cors_origin,
                "Invalid CORS origin, allowing none"
            );
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to ShareSpoon API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let ping = match &state.database {
        Some(database) => database.ping().await.map_err(|e| e.to_string()),
        None => Err("database not configured".to_string()),
    };

    let (status_code, database) = match ping {
        Ok(()) => (
            StatusCode::OK,
            ServiceStatus {
                status: "healthy",
                error: None,
            },
        ),
        Err(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            ServiceStatus {
                status: "unhealthy",
                error: Some(error),
            },
        ),
    };

    let response = HealthResponse {
        status: if status_code.is_success() {
            "healthy"
        } else {
            "degraded"
        },
        services: ServiceHealth { database },
    };

    (status_code, Json(response))
}
