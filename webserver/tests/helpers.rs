//! Test helper utilities for webserver route tests

use std::net::SocketAddr;

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use axum::Router;
use generator::OfflineGenerator;
use orchestrator::{EngineConfig, MemoryWorkshopStore, WorkshopOrchestrator, WorkshopRepository};
use serde_json::Value;
use tower::ServiceExt;

use webserver::WebServer;

pub fn test_address() -> SocketAddr {
    "127.0.0.1:0".parse().unwrap()
}

/// Router over an in-memory store with no provider configured
pub fn demo_router() -> Router {
    router_with_store(MemoryWorkshopStore::new())
}

pub fn router_with_store<R: WorkshopRepository + 'static>(store: R) -> Router {
    let orchestrator = WorkshopOrchestrator::new(store, OfflineGenerator, EngineConfig::default());
    WebServer::new(test_address(), orchestrator).build_router()
}

/// Send one request through the router and decode the JSON body
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri, None).await
}

pub async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(body)).await
}

pub async fn post_empty(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::POST, uri, None).await
}

/// Create a workshop and return its id
pub async fn create_workshop(router: &Router) -> String {
    let (status, body) = post(router, "/api/workshops", crate::fixtures::create_body()).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

/// Create a workshop with both imports and the survey submitted, then reconcile
pub async fn reconciled_workshop(router: &Router) -> String {
    let id = create_workshop(router).await;
    let (status, _) = post(router, &format!("/api/workshops/{id}/import/research"), crate::fixtures::research_body()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post(router, &format!("/api/workshops/{id}/import/cognition"), crate::fixtures::cognition_body()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post(router, &format!("/api/workshops/{id}/survey"), crate::fixtures::survey_body()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = post_empty(router, &format!("/api/workshops/{id}/reconcile")).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    id
}
