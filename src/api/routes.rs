//! Router configuration for the API.
//!
//! Handlers register themselves with an `OpenApiRouter`, so the document
//! served at `/api-docs/openapi.json` always matches the mounted routes.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{REQUEST_ID_HEADER, logging_middleware, request_id_middleware};
use crate::config::{ServerConfig, Settings};
use crate::state::AppState;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Last added runs first:
/// 1. Request ID (outermost) - assigns the id and stamps error bodies
/// 2. Logging - one span per request carrying that id
/// 3. CORS, compression, request timeout
///
/// # Routes
/// - `/api/categories` - Category CRUD and slug lookup
/// - `/api/products` - Product CRUD
/// - `/health`, `/health/ready`, `/health/live` - Probes
/// - `/swagger-ui`, `/api-docs/openapi.json` - API documentation
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    let (router, api) = api_router().split_for_parts();

    router
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, api))
        .layer(TimeoutLayer::new(Duration::from_secs(
            settings.server.request_timeout,
        )))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&settings.server))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/categories", handlers::categories::category_routes())
        .nest("/api/products", handlers::products::product_routes())
        .merge(handlers::health::health_routes())
}

/// The generated OpenAPI document, without starting a server.
pub fn openapi_document() -> utoipa::openapi::OpenApi {
    api_router().into_openapi()
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.cors_allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_origins(config))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

fn parse_origins(config: &ServerConfig) -> Vec<HeaderValue> {
    config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::testing::{TestApp, send};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_openapi_lists_catalog_paths() {
        let doc = openapi_document();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/categories/{id}",
            "/api/categories/slug/{slug}",
            "/api/products/{id}",
            "/health",
            "/health/ready",
        ] {
            assert!(
                doc.paths.paths.contains_key(expected),
                "missing {} in {:?}",
                expected,
                paths
            );
        }
    }

    #[tokio::test]
    async fn test_openapi_json_is_served() {
        let app = TestApp::new();
        let (status, body) = send(&app.router, Method::GET, OPENAPI_JSON_PATH, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "Storefront");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = TestApp::new();
        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/unknown")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_cors_preflight_for_configured_origin() {
        let (repos, _) = crate::repositories::Repositories::in_memory();
        let mut settings = Settings::default();
        settings.server.cors_allowed_origins = vec!["http://localhost:5173".to_string()];
        let router = create_router(AppState::for_tests(repos), &settings);

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/categories")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn test_error_responses_keep_cors_headers() {
        let app = TestApp::new();
        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/categories/slug/absent")
                    .header(header::ORIGIN, "http://shop.example")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_when_unconfigured() {
        let app = TestApp::new();
        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .header(header::ORIGIN, "http://shop.example")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
