// src/server/handlers/mod.rs
//! Request handlers for the update server
//!
//! [`handle_request`] is the synchronous entry point: it validates the raw
//! path, picks a handler by file extension and records the outcome.

pub mod appcast;
pub mod files;

use crate::server::platform::Platform;
use crate::server::request::{classify, validate_path, RequestError, RequestResult, Route};
use crate::server::{ServerContext, ServerState};

pub use appcast::handle_appcast;
pub use files::handle_file;

/// Handle one request from its raw path and query string
pub fn handle_request(state: &ServerState, path: &str, query: &str) -> RequestResult {
    let route = match validate_path(path).and_then(|()| classify(path)) {
        Ok(route) => route,
        Err(e) => {
            state.metrics.record_failure();
            return Err(e);
        }
    };

    let result = match route {
        Route::Appcast => handle_appcast(state, path, query),
        Route::File(kind) => handle_file(&state.context, path, kind),
    };

    match (&result, route) {
        (Ok(payload), Route::Appcast) => {
            state.metrics.record_appcast(payload.content_length() as u64)
        }
        (Ok(payload), Route::File(_)) => {
            state.metrics.record_file(payload.content_length() as u64)
        }
        (Err(_), _) => state.metrics.record_failure(),
    }

    result
}

/// Check the app name and platform token of a request
fn check_target(ctx: &ServerContext, app: &str, platform: &str) -> Result<Platform, RequestError> {
    if app != ctx.app_name {
        return Err(RequestError::InvalidAppName(app.to_string()));
    }
    Platform::from_token(platform)
        .ok_or_else(|| RequestError::InvalidPlatform(platform.to_string()))
}
