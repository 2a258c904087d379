// src/server/config.rs
//! Configuration file parsing for the update server
//!
//! Supports TOML configuration files with the following sections:
//! - [server] - Bind address, request logging
//! - [catalog] - Catalog root directory, application name

use crate::server::{ServerConfig, DEFAULT_APP_NAME};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
pub struct AppcastConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogSection,
}

/// Server configuration section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Bind address as `host:port`
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Emit a tracing span per HTTP request
    #[serde(default = "default_true")]
    pub audit_log: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            audit_log: true,
        }
    }
}

fn default_bind() -> String {
    "localhost:8000".to_string()
}

fn default_true() -> bool {
    true
}

/// Catalog configuration section
#[derive(Debug, Deserialize)]
pub struct CatalogSection {
    /// Directory holding `{app}/{platform}/` channels
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Application name accepted in request paths
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            app_name: default_app_name(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

impl AppcastConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: AppcastConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        split_bind(&self.server.bind)
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))?;

        let app_name = &self.catalog.app_name;
        if app_name.is_empty() || app_name.contains('/') || app_name.starts_with('.') {
            anyhow::bail!("catalog.app_name must be a single path segment, got '{}'", app_name);
        }

        Ok(())
    }

    /// Convert to the internal ServerConfig structure
    pub fn to_server_config(&self) -> ServerConfig {
        ServerConfig {
            bind: self.server.bind.clone(),
            root_dir: self.catalog.root.clone(),
            app_name: self.catalog.app_name.clone(),
            enable_audit_log: self.server.audit_log,
        }
    }
}

/// Split a `host:port` bind string; IPv6 hosts keep their brackets
pub fn split_bind(bind: &str) -> Result<(&str, u16)> {
    let (host, port) = bind
        .rsplit_once(':')
        .with_context(|| format!("Missing port in '{}'", bind))?;
    if host.is_empty() {
        anyhow::bail!("Missing host in '{}'", bind);
    }
    let port = port
        .parse::<u16>()
        .with_context(|| format!("Invalid port in '{}'", bind))?;
    Ok((host, port))
}

/// Join a host and port into a bind string, bracketing bare IPv6 hosts
pub fn join_bind(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppcastConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.bind, "localhost:8000");
        assert_eq!(config.catalog.app_name, "your-app");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
[server]
bind = "0.0.0.0:9000"
audit_log = false

[catalog]
root = "/srv/updates"
app_name = "my-app"
"#;
        let config: AppcastConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_ok());

        let server = config.to_server_config();
        assert_eq!(server.bind, "0.0.0.0:9000");
        assert_eq!(server.root_dir, PathBuf::from("/srv/updates"));
        assert_eq!(server.app_name, "my-app");
        assert!(!server.enable_audit_log);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppcastConfig = toml::from_str("[catalog]\nroot = \"/tmp\"\n").unwrap();
        assert_eq!(config.server.bind, "localhost:8000");
        assert!(config.server.audit_log);
        assert_eq!(config.catalog.app_name, "your-app");
    }

    #[test]
    fn test_invalid_bind() {
        let config: AppcastConfig = toml::from_str("[server]\nbind = \"localhost\"\n").unwrap();
        assert!(config.validate().is_err());

        let config: AppcastConfig =
            toml::from_str("[server]\nbind = \"localhost:http\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_app_name() {
        let config: AppcastConfig = toml::from_str("[catalog]\napp_name = \"a/b\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appcast.toml");
        std::fs::write(&path, "[server]\nbind = \"127.0.0.1:0\"\n").unwrap();

        let config = AppcastConfig::load(&path).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:0");
        assert!(AppcastConfig::load(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_bind_helpers() {
        assert_eq!(split_bind("localhost:8000").unwrap(), ("localhost", 8000));
        assert_eq!(split_bind("[::1]:8000").unwrap(), ("[::1]", 8000));
        assert!(split_bind(":8000").is_err());
        assert_eq!(join_bind("localhost", 80), "localhost:80");
        assert_eq!(join_bind("::1", 80), "[::1]:80");
        assert_eq!(join_bind("[::1]", 80), "[::1]:80");
    }
}
