// src/lib.rs

//! Appcast Update Server
//!
//! Development-time update endpoint for desktop applications. Auto-update
//! clients poll it for "is there a newer version, and where do I get it".
//!
//! # Architecture
//!
//! - Catalog on disk: `{root}/{app}/{platform}/` holds one JSON metadata
//!   document per release plus its installer and changelog
//! - Stateless requests: the catalog is rescanned for every appcast query
//! - Strict versions: `major.minor[.patch]`, numeric only
//! - Opaque failures: any error is an empty 404, details stay in the log

mod error;
pub mod server;
pub mod version;

pub use error::{Error, Result};
pub use server::{
    create_router, handle_request, run_server, Catalog, Payload, Platform, RequestError,
    RequestResult, ServerConfig, ServerContext, ServerState, VersionRecord,
};
pub use version::{Version, VersionParseError};
