//! Custom request extractors.

mod path;
mod validated_json;
mod validated_query;

pub use path::Path;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use serde::Deserialize;
    use tower::ServiceExt;
    use validator::Validate;

    use crate::types::PageRequest;

    #[derive(Debug, Deserialize, Validate)]
    struct NameBody {
        #[validate(length(min = 3, message = "Name must be between 3 and 50 characters"))]
        name: String,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct ListQuery {
        #[serde(default)]
        ids: Vec<i64>,
        #[validate(range(min = 1, message = "Page index must be at least 1"))]
        page: u64,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/body",
                axum::routing::post(|ValidatedJson(body): ValidatedJson<NameBody>| async move {
                    body.name
                }),
            )
            .route(
                "/query",
                get(|ValidatedQuery(query): ValidatedQuery<ListQuery>| async move {
                    format!("{:?}", query.ids)
                }),
            )
            .route(
                "/pages",
                get(|ValidatedQuery(page): ValidatedQuery<PageRequest>| async move {
                    page.offset().to_string()
                }),
            )
            .route(
                "/items/:id",
                get(|Path(id): Path<i64>| async move { id.to_string() }),
            )
    }

    async fn status_of(request: Request<Body>) -> u16 {
        app().oneshot(request).await.unwrap().status().as_u16()
    }

    #[tokio::test]
    async fn test_json_validation_failure_is_400() {
        let request = Request::post("/body")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"ab"}"#))
            .unwrap();
        assert_eq!(status_of(request).await, 400);
    }

    #[tokio::test]
    async fn test_valid_json_passes() {
        let request = Request::post("/body")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name":"Banana"}"#))
            .unwrap();
        assert_eq!(status_of(request).await, 200);
    }

    #[tokio::test]
    async fn test_repeated_query_keys_form_a_list() {
        let request = Request::get("/query?ids=1&ids=2&page=1")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"[1, 2]");
    }

    #[tokio::test]
    async fn test_query_validation_failure_is_400() {
        let request = Request::get("/query?page=0").body(Body::empty()).unwrap();
        assert_eq!(status_of(request).await, 400);
    }

    #[tokio::test]
    async fn test_page_index_beyond_limit_is_400() {
        let request = Request::get("/pages?pageIndex=18446744073709551615&pageSize=10")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(request).await, 400);

        let request = Request::get("/pages?pageIndex=3&pageSize=10")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"20");
    }

    #[tokio::test]
    async fn test_malformed_path_segment_is_json_400() {
        let response = app()
            .oneshot(Request::get("/items/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["statusCode"], 400);
        assert_eq!(json["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_numeric_path_segment_passes() {
        let request = Request::get("/items/42").body(Body::empty()).unwrap();
        assert_eq!(status_of(request).await, 200);
    }
}
