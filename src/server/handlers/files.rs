// src/server/handlers/files.rs
//! Installer and changelog downloads
//!
//! GET /{app}/{platform}/{file}.{exe|dmg|md}

use super::check_target;
use crate::server::catalog::channel_dir;
use crate::server::platform::ArtifactKind;
use crate::server::request::{Payload, RequestError, RequestPath, RequestResult};
use crate::server::ServerContext;

/// Read a file from a platform channel
///
/// `kind` comes from the router's extension check and decides the content
/// type; the path has already passed traversal validation.
pub fn handle_file(ctx: &ServerContext, path: &str, kind: ArtifactKind) -> RequestResult {
    let RequestPath::Artifact {
        app,
        platform,
        filename,
    } = RequestPath::parse(path)?
    else {
        return Err(RequestError::InvalidUrl);
    };
    let platform = check_target(ctx, app, platform)?;

    let file_path = channel_dir(&ctx.root_dir, app, platform).join(filename);
    if !file_path.is_file() {
        return Err(RequestError::FileNotFound);
    }

    let bytes = std::fs::read(&file_path).map_err(RequestError::FileUnreadable)?;

    Ok(Payload {
        bytes,
        content_type: kind.content_type(),
        source: file_path,
    })
}
