// src/error.rs

//! Crate-level error type for startup and configuration failures
//!
//! Per-request failures live in [`crate::server::RequestError`]; they never
//! escape a request and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing or running the server
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog root directory is missing or not a directory
    #[error("Root directory does not exist: {}", .0.display())]
    RootDirMissing(PathBuf),

    /// I/O error while binding or serving
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;
