// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use appcast_server::{ServerContext, ServerState};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const APP: &str = "your-app";

/// Installer bytes used by the catalog fixture (not valid UTF-8 on purpose)
pub const INSTALLER_BYTES: &[u8] = &[0x4d, 0x5a, 0x90, 0x00, 0xff, 0xfe, 0x00, 0x01];

/// Create a catalog with releases 1.0.0 and 1.2.0 for Windows, plus a
/// corrupt metadata document that must be skipped.
///
/// Returns (TempDir, ServerState) - keep the TempDir alive to prevent cleanup.
pub fn setup_catalog() -> (TempDir, ServerState) {
    let temp_dir = tempfile::tempdir().unwrap();
    let win = temp_dir.path().join(APP).join("win");
    fs::create_dir_all(&win).unwrap();
    fs::create_dir_all(temp_dir.path().join(APP).join("mac")).unwrap();

    fs::write(
        win.join("app-1.0.0"),
        r#"{"version": "1.0.0", "date": "2023-01-10"}"#,
    )
    .unwrap();
    fs::write(
        win.join("app-1.2.0"),
        r#"{"version": "1.2.0", "date": "2023-06-02", "mandatory": false}"#,
    )
    .unwrap();
    fs::write(win.join("broken"), "{ not json").unwrap();
    fs::write(win.join("app-1.2.0.exe"), INSTALLER_BYTES).unwrap();
    fs::write(win.join("app-1.2.0.md"), "# 1.2.0\n\n- Fixes\n").unwrap();

    let state = state_for(temp_dir.path().to_path_buf());
    (temp_dir, state)
}

/// Server state rooted at `root`, pretending to listen on 127.0.0.1:8000
pub fn state_for(root: PathBuf) -> ServerState {
    ServerState::new(ServerContext {
        root_dir: root,
        app_name: APP.to_string(),
        server_addr: "127.0.0.1:8000".parse().unwrap(),
    })
    .with_audit_log(false)
}

/// Parse a JSON payload into a value
pub fn json(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).unwrap()
}
