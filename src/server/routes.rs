// src/server/routes.rs
//! Axum router configuration for the update server
//!
//! Request paths are classified by the core (see [`crate::server::request`]),
//! so everything goes through a single fallback handler instead of axum
//! route patterns. The core is blocking filesystem code and runs on the
//! blocking thread pool.

use crate::server::handlers::handle_request;
use crate::server::ServerState;
use axum::{
    body::Body,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the main application router
pub fn create_router(state: Arc<ServerState>) -> Router {
    let router = Router::new().fallback(serve);

    let router = if state.enable_audit_log {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

/// GET /{app}/{platform}[/{file}]
async fn serve(State(state): State<Arc<ServerState>>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path = uri.path().to_string();
    let query = uri.query().unwrap_or_default().to_string();
    tracing::debug!("Request received: '{}'", uri);

    let worker_state = Arc::clone(&state);
    let result = match tokio::task::spawn_blocking(move || {
        handle_request(&worker_state, &path, &query)
    })
    .await
    {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Request handler for '{}' failed: {}", uri, e);
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    let payload = match result {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!("Request failed ({})", e);
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    tracing::debug!(
        "Request succeeded ('{}')",
        payload
            .source
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    );

    let content_length = payload.content_length();
    let body = if method == Method::HEAD {
        Body::empty()
    } else {
        Body::from(payload.bytes)
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, payload.content_type.to_string()),
            (header::CONTENT_LENGTH, content_length.to_string()),
        ],
        body,
    )
        .into_response()
}
