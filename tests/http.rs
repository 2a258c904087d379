// tests/http.rs

//! HTTP adapter tests: status codes, headers and bodies through the axum router.

mod common;

use appcast_server::create_router;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use common::{json, setup_catalog, INSTALLER_BYTES};
use std::sync::Arc;
use tower::ServiceExt;

async fn send(state: &Arc<appcast_server::ServerState>, method: Method, uri: &str) -> Response {
    create_router(Arc::clone(state))
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

#[tokio::test]
async fn test_appcast_ok() {
    let (_dir, state) = setup_catalog();
    let state = Arc::new(state);

    let response = send(&state, Method::GET, "/your-app/win?version=latest").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let length: usize = response.headers()[header::CONTENT_LENGTH]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    let body = body_bytes(response).await;
    assert_eq!(length, body.len());
    assert_eq!(json(&body)["version"], "1.2.0");
}

#[tokio::test]
async fn test_file_ok() {
    let (_dir, state) = setup_catalog();
    let state = Arc::new(state);

    let response = send(&state, Method::GET, "/your-app/win/app-1.2.0.exe").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.microsoft.portable-executable"
    );
    assert_eq!(
        response.headers()[header::CONTENT_LENGTH],
        INSTALLER_BYTES.len().to_string().as_str()
    );
    assert_eq!(body_bytes(response).await, INSTALLER_BYTES);
}

#[tokio::test]
async fn test_failures_are_empty_404() {
    let (_dir, state) = setup_catalog();
    let state = Arc::new(state);

    for uri in [
        "/your-app/win?version=1.5.0",
        "/your-app/win?version=9.9.9",
        "/your-app/win?version=1.1.0",
        "/your-app/win?version=abc",
        "/your-app/mac",
        "/other-app/win",
        "/your-app/win/file.zip",
        "/your-app/win/app-9.9.9.exe",
        "/your-app/win/../win/app-1.2.0.exe",
        "/",
    ] {
        let response = send(&state, Method::GET, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri '{}'", uri);
        assert!(body_bytes(response).await.is_empty(), "uri '{}'", uri);
    }
}

#[tokio::test]
async fn test_head_has_headers_without_body() {
    let (_dir, state) = setup_catalog();
    let state = Arc::new(state);

    let response = send(&state, Method::HEAD, "/your-app/win/app-1.2.0.md").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/markdown");
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_other_methods_not_allowed() {
    let (_dir, state) = setup_catalog();
    let state = Arc::new(state);

    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let response = send(&state, method.clone(), "/your-app/win").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", method);
    }
}
