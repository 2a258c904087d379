// src/server/request.rs
//! Request path validation, classification and outcome types
//!
//! Everything here works on the raw (still percent-encoded) request path.
//! Traversal checks run before the path is split or touches the filesystem.

use crate::server::platform::ArtifactKind;
use crate::version::Version;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Why a request could not be served
///
/// The message is for server-side logs only; clients just see a 404.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Traversal attempt, wrong segment count or unsupported extension
    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Invalid app name: {0}")]
    InvalidAppName(String),

    #[error("Invalid platform: {0}")]
    InvalidPlatform(String),

    /// The platform catalog has no usable metadata documents
    #[error("No latest version available")]
    NoLatestVersion,

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Version not available (too high): {0}")]
    VersionTooHigh(Version),

    #[error("Version not available")]
    VersionNotAvailable,

    #[error("File does not exist")]
    FileNotFound,

    #[error("Cannot read file content")]
    FileUnreadable(#[source] std::io::Error),

    /// Serializing the matched metadata document failed
    #[error("Cannot encode metadata: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Response content for a successful request
#[derive(Debug, Clone)]
pub struct Payload {
    /// Raw response body
    pub bytes: Vec<u8>,
    /// MIME type
    pub content_type: &'static str,
    /// File the content came from (diagnostics only)
    pub source: PathBuf,
}

impl Payload {
    pub fn content_length(&self) -> usize {
        self.bytes.len()
    }
}

/// Outcome of handling one request
pub type RequestResult = Result<Payload, RequestError>;

/// Reject paths that could escape the catalog root
pub fn validate_path(path: &str) -> Result<(), RequestError> {
    if path.contains("..") || path.contains("/.") || path.contains("./") {
        return Err(RequestError::InvalidUrl);
    }
    Ok(())
}

/// Dotted extension of the last path component, or "" if there is none
///
/// Leading dots of the file name do not start an extension, so ".md" has no
/// extension while "notes.md" has ".md".
pub fn extension_of(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(idx) => &name[stem_start + idx..],
        None => "",
    }
}

/// Handler a validated path is dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Metadata query for a platform channel
    Appcast,
    /// Download of an installer or changelog
    File(ArtifactKind),
}

/// Classify a path by the extension of its last component
pub fn classify(path: &str) -> Result<Route, RequestError> {
    match extension_of(path) {
        "" => Ok(Route::Appcast),
        ext => ArtifactKind::from_extension(ext)
            .map(Route::File)
            .ok_or(RequestError::InvalidUrl),
    }
}

/// Structured view of a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPath<'a> {
    /// `/{app}/{platform}`
    Channel { app: &'a str, platform: &'a str },
    /// `/{app}/{platform}/{filename}`
    Artifact {
        app: &'a str,
        platform: &'a str,
        filename: &'a str,
    },
}

impl<'a> RequestPath<'a> {
    /// Split an absolute path into its named parts
    ///
    /// Empty segments are kept, so "/app/win/" is a three-part artifact path
    /// with an empty file name, and "//win" has an empty app name.
    pub fn parse(path: &'a str) -> Result<Self, RequestError> {
        let segments: Vec<&str> = path.split('/').collect();
        match segments[..] {
            ["", app, platform] => Ok(Self::Channel { app, platform }),
            ["", app, platform, filename] => Ok(Self::Artifact {
                app,
                platform,
                filename,
            }),
            _ => Err(RequestError::InvalidUrl),
        }
    }
}

/// Decode a query string, keeping the first value of repeated keys
///
/// Parameters with an empty value are dropped, so `?version=` behaves as if
/// no version had been given.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}
