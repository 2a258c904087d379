// src/server/handlers/appcast.rs
//! Appcast endpoint - metadata for a platform channel
//!
//! GET /{app}/{platform}?version={x.y.z|latest}
//!
//! Answers with the matching release's metadata document, including the
//! injected `installerUrl` and `changelogUrl`.

use super::check_target;
use crate::server::catalog;
use crate::server::request::{parse_query, Payload, RequestError, RequestPath, RequestResult};
use crate::server::resolver::{find_exact, resolve_latest, resolve_requested, LATEST_ALIAS};
use crate::server::ServerState;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Resolve the requested version of a channel and encode its metadata
pub fn handle_appcast(state: &ServerState, path: &str, query: &str) -> RequestResult {
    let ctx = &state.context;

    let RequestPath::Channel { app, platform } = RequestPath::parse(path)? else {
        return Err(RequestError::InvalidUrl);
    };
    let platform = check_target(ctx, app, platform)?;
    let params = parse_query(query);

    let catalog = catalog::scan(&ctx.root_dir, app, platform, &ctx.server_addr);
    if !catalog.skipped().is_empty() {
        state.metrics.record_skipped_entries(catalog.skipped().len() as u64);
    }

    let latest = resolve_latest(&catalog).ok_or(RequestError::NoLatestVersion)?;

    let token = params.get("version").map(String::as_str).unwrap_or(LATEST_ALIAS);
    let requested = resolve_requested(&catalog, token)
        .ok_or_else(|| RequestError::InvalidVersion(token.to_string()))?;

    if requested > latest.version {
        return Err(RequestError::VersionTooHigh(requested));
    }

    let record = find_exact(&catalog, &requested).ok_or(RequestError::VersionNotAvailable)?;
    let bytes = serde_json::to_vec(&record.metadata)?;

    Ok(Payload {
        bytes,
        content_type: JSON_CONTENT_TYPE,
        source: record.metadata_path.clone(),
    })
}
