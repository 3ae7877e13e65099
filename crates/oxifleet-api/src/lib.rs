//! `oxifleet-api` - Read-only collection-query service
//!
//! Serves slices of one static JSON document of named collections:
//!
//! - any non-GET method answers `405` with a plain-text body
//! - `GET /` returns the whole document
//! - `GET /<collection>` returns that collection's array, or `[]` when the
//!   name is absent or not an array
//! - `GET /<collection>/<id>` returns the first record whose `id`, compared
//!   as a string, equals the path segment, or `{}` when none matches
//!
//! Lookup misses are always `200` responses; path segments beyond the
//! second are ignored; a configurable route prefix is stripped when
//! present. The service is stateless and performs no writes — the client's
//! mutating verbs land here as 405s, a contract gap carried over from the
//! original deployment rather than fixed.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use axum::Router;
use tower_http::trace::TraceLayer;

use oxifleet::Dataset;

/// Shared state: the document loaded once at startup, plus the route
/// prefix to strip.
#[derive(Debug, Clone)]
pub struct ServiceState {
    dataset: Arc<Dataset>,
    route_prefix: Arc<str>,
}

impl ServiceState {
    /// Build state over a loaded dataset.
    #[must_use]
    pub fn new(dataset: Dataset, route_prefix: impl Into<String>) -> Self {
        Self {
            dataset: Arc::new(dataset),
            route_prefix: route_prefix.into().into(),
        }
    }
}

/// Build the service router. Every path funnels through the one
/// collection-query handler.
pub fn router(state: ServiceState) -> Router {
    Router::new()
        .fallback(collection_query)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn collection_query(
    State(state): State<ServiceState>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET {
        return (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
    }

    let path = uri.path();
    let path = path
        .strip_prefix(state.route_prefix.as_ref())
        .unwrap_or(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let body = match segments.as_slice() {
        [] => state.dataset.document(),
        [collection] => state.dataset.collection(collection),
        // Extra segments are ignored
        [collection, id, ..] => state.dataset.record(collection, id),
    };

    Json(body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let dataset = Dataset::from_value(json!({
            "vehicles": [
                { "id": "VH-884", "model": "Freightliner Cascadia" },
                { "id": 7, "model": "Numeric Id" },
            ],
            "invoices": [
                { "id": "INV-2049", "vendor": "Metro Service Hub" },
            ],
        }))
        .unwrap();
        router(ServiceState::new(dataset, "/api"))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get(router: Router, path: &str) -> Response {
        router
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_non_get_is_405() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/vehicles")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Method Not Allowed");
    }

    #[tokio::test]
    async fn test_empty_path_returns_whole_document() {
        let response = get(test_router(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let doc = body_json(response).await;
        assert!(doc["vehicles"].is_array());
        assert!(doc["invoices"].is_array());
    }

    #[tokio::test]
    async fn test_collection_lookup() {
        let response = get(test_router(), "/vehicles").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );

        let vehicles = body_json(response).await;
        assert_eq!(vehicles.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_absent_collection_is_empty_array() {
        let response = get(test_router(), "/ghosts").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_record_lookup() {
        let response = get(test_router(), "/vehicles/VH-884").await;
        assert_eq!(
            body_json(response).await["model"],
            "Freightliner Cascadia"
        );
    }

    #[tokio::test]
    async fn test_numeric_id_compared_as_string() {
        let response = get(test_router(), "/vehicles/7").await;
        assert_eq!(body_json(response).await["model"], "Numeric Id");
    }

    #[tokio::test]
    async fn test_absent_id_is_200_with_empty_object() {
        let response = get(test_router(), "/vehicles/999").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({}));
    }

    #[tokio::test]
    async fn test_route_prefix_is_stripped() {
        let response = get(test_router(), "/api/invoices/INV-2049").await;
        assert_eq!(body_json(response).await["vendor"], "Metro Service Hub");
    }

    #[tokio::test]
    async fn test_extra_path_segments_ignored() {
        let response = get(test_router(), "/vehicles/VH-884/anything/else").await;
        assert_eq!(
            body_json(response).await["model"],
            "Freightliner Cascadia"
        );
    }
}
