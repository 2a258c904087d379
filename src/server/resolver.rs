// src/server/resolver.rs
//! Resolve requested versions against a scanned catalog

use crate::server::catalog::{Catalog, VersionRecord};
use crate::version::Version;

/// Alias clients send to ask for the newest release
pub const LATEST_ALIAS: &str = "latest";

/// Newest release in the catalog
pub fn resolve_latest(catalog: &Catalog) -> Option<&VersionRecord> {
    catalog.records().last()
}

/// Turn a requested version token into a concrete version
///
/// `"latest"` maps to the newest release (none on an empty catalog); any
/// other token must parse strictly. The result is not checked for presence
/// in the catalog; use [`find_exact`] for that.
pub fn resolve_requested(catalog: &Catalog, token: &str) -> Option<Version> {
    if token == LATEST_ALIAS {
        return resolve_latest(catalog).map(|record| record.version.clone());
    }
    Version::parse_strict(token).ok()
}

/// First record whose version equals `version`
pub fn find_exact<'a>(catalog: &'a Catalog, version: &Version) -> Option<&'a VersionRecord> {
    catalog.records().iter().find(|record| &record.version == version)
}
