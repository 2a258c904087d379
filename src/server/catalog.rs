// src/server/catalog.rs
//! Release catalog scanning
//!
//! A platform channel lives at `{root}/{app}/{platform}/` and holds one JSON
//! metadata document per release, next to that release's installer and
//! changelog:
//!
//! ```text
//! your-app/win/app-1.2.0        metadata ({"version": "1.2.0", ...})
//! your-app/win/app-1.2.0.exe    installer
//! your-app/win/app-1.2.0.md     changelog
//! ```
//!
//! Metadata documents are either extension-free or end in `.json`. The
//! catalog is rebuilt from disk on every request; broken documents are
//! skipped and reported, never fatal.

use crate::server::platform::{ArtifactKind, Platform};
use crate::server::request::extension_of;
use crate::version::{Version, VersionParseError};
use serde_json::{Map, Value};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Metadata key injected with the installer download URL
pub const INSTALLER_URL_KEY: &str = "installerUrl";
/// Metadata key injected with the changelog URL
pub const CHANGELOG_URL_KEY: &str = "changelogUrl";

const METADATA_JSON_SUFFIX: &str = ".json";

/// One release found in the catalog
#[derive(Debug, Clone)]
pub struct VersionRecord {
    /// Parsed value of the document's `version` field
    pub version: Version,
    /// Document the record was read from
    pub metadata_path: PathBuf,
    /// Base name shared with the installer and changelog files
    pub stem: String,
    /// Document contents plus the injected download URLs
    pub metadata: Map<String, Value>,
}

impl VersionRecord {
    pub fn installer_url(&self) -> Option<&str> {
        self.metadata.get(INSTALLER_URL_KEY).and_then(Value::as_str)
    }

    pub fn changelog_url(&self) -> Option<&str> {
        self.metadata.get(CHANGELOG_URL_KEY).and_then(Value::as_str)
    }
}

/// Why a catalog entry was left out
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("file name is not valid UTF-8")]
    NonUtf8Name,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document is not a JSON object")]
    NotAnObject,

    #[error("missing 'version' field")]
    MissingVersion,

    #[error("'version' field is not a string")]
    VersionNotString,

    #[error("{0}")]
    InvalidVersion(#[from] VersionParseError),
}

/// A catalog entry that was skipped during a scan
#[derive(Debug)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Releases of one platform channel, oldest first
#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<VersionRecord>,
    skipped: Vec<SkippedEntry>,
}

impl Catalog {
    /// Records sorted ascending by version
    pub fn records(&self) -> &[VersionRecord] {
        &self.records
    }

    /// Entries left out of the catalog, with the reason for each
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Directory holding a platform channel
pub fn channel_dir(root: &Path, app: &str, platform: Platform) -> PathBuf {
    root.join(app).join(platform.as_str())
}

/// Public URL of a file in a platform channel
pub fn artifact_url(
    server_addr: &SocketAddr,
    app: &str,
    platform: Platform,
    file_name: &str,
) -> String {
    format!("http://{}/{}/{}/{}", server_addr, app, platform, file_name)
}

/// Scan a platform channel and build its catalog
///
/// `server_addr` is the address the server is bound to; it is baked into the
/// injected `installerUrl` and `changelogUrl` values.
pub fn scan(root: &Path, app: &str, platform: Platform, server_addr: &SocketAddr) -> Catalog {
    let dir = channel_dir(root, app, platform);
    let mut catalog = Catalog::default();

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list catalog directory {}: {}", dir.display(), e);
            return catalog;
        }
    };

    // Sort by name so ties between equal versions resolve the same way every time
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_metadata_candidate(path))
        .collect();
    candidates.sort();

    for path in candidates {
        match read_record(&path) {
            Ok((version, stem, mut metadata)) => {
                let installer = format!("{}{}", stem, platform.installer().extension());
                let changelog = format!("{}{}", stem, ArtifactKind::Changelog.extension());
                metadata.insert(
                    INSTALLER_URL_KEY.to_string(),
                    Value::String(artifact_url(server_addr, app, platform, &installer)),
                );
                metadata.insert(
                    CHANGELOG_URL_KEY.to_string(),
                    Value::String(artifact_url(server_addr, app, platform, &changelog)),
                );

                catalog.records.push(VersionRecord {
                    version,
                    metadata_path: path,
                    stem,
                    metadata,
                });
            }
            Err(reason) => {
                warn!("Skipping catalog entry {}: {}", path.display(), reason);
                catalog.skipped.push(SkippedEntry { path, reason });
            }
        }
    }

    // Stable: equal versions keep file-name order
    catalog.records.sort_by(|a, b| a.version.cmp(&b.version));

    for pair in catalog.records.windows(2) {
        if pair[0].version == pair[1].version {
            warn!(
                "Duplicate version {} in {} and {}; serving the first",
                pair[0].version,
                pair[0].metadata_path.display(),
                pair[1].metadata_path.display()
            );
        }
    }

    debug!(
        "Scanned {}: {} releases, {} skipped",
        dir.display(),
        catalog.records.len(),
        catalog.skipped.len()
    );

    catalog
}

/// Regular, non-hidden files named `<stem>.json` or with no extension
///
/// An all-digit trailing segment is a version component, not an extension,
/// so `app-1.2.0` qualifies while `app-1.2.0.zip` and `app.json.bak` do not.
fn is_metadata_candidate(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    if name.starts_with('.') || !path.is_file() {
        return false;
    }
    match extension_of(&name) {
        "" | METADATA_JSON_SUFFIX => true,
        ext => ext.len() > 1 && ext[1..].bytes().all(|b| b.is_ascii_digit()),
    }
}

fn read_record(path: &Path) -> Result<(Version, String, Map<String, Value>), SkipReason> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or(SkipReason::NonUtf8Name)?;
    let stem = name
        .strip_suffix(METADATA_JSON_SUFFIX)
        .filter(|s| !s.is_empty())
        .unwrap_or(name)
        .to_string();

    let content = fs::read(path)?;
    let metadata = match serde_json::from_slice::<Value>(&content)? {
        Value::Object(map) => map,
        _ => return Err(SkipReason::NotAnObject),
    };

    let version = match metadata.get("version") {
        Some(Value::String(s)) => Version::parse_strict(s)?,
        Some(_) => return Err(SkipReason::VersionNotString),
        None => return Err(SkipReason::MissingVersion),
    };

    Ok((version, stem, metadata))
}
