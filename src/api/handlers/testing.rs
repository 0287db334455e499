//! Router harness for handler tests, backed by the in-memory catalog.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use crate::api::routes::create_router;
use crate::config::Settings;
use crate::repositories::{InMemoryCatalog, Repositories};
use crate::state::AppState;

pub struct TestApp {
    pub router: Router,
    pub catalog: InMemoryCatalog,
}

impl TestApp {
    pub fn new() -> Self {
        let (repos, catalog) = Repositories::in_memory();
        let state = AppState::for_tests(repos);
        Self {
            router: create_router(state, &Settings::default()),
            catalog,
        }
    }
}

/// Sends one request and returns the status with the JSON body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
