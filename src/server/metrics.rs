// src/server/metrics.rs
//! Server metrics tracking
//!
//! Simple atomic counters for request/response statistics. A snapshot is
//! logged when the server shuts down.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Server metrics collector
#[derive(Debug, Default)]
pub struct ServerMetrics {
    /// Total requests handled
    requests_total: AtomicU64,
    /// Appcast documents served
    appcasts_served: AtomicU64,
    /// Installer and changelog downloads served
    files_served: AtomicU64,
    /// Requests answered with 404
    failures: AtomicU64,
    /// Bytes served
    bytes_served: AtomicU64,
    /// Catalog entries skipped while scanning (cumulative across requests)
    catalog_entries_skipped: AtomicU64,
    /// Server start time
    start_time: std::sync::OnceLock<Instant>,
}

impl ServerMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        let metrics = Self::default();
        let _ = metrics.start_time.set(Instant::now());
        metrics
    }

    /// Record a successful appcast response
    pub fn record_appcast(&self, bytes: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.appcasts_served.fetch_add(1, Ordering::Relaxed);
        self.bytes_served.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a successful file download
    pub fn record_file(&self, bytes: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.files_served.fetch_add(1, Ordering::Relaxed);
        self.bytes_served.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a failed request
    pub fn record_failure(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record catalog entries skipped during a scan
    pub fn record_skipped_entries(&self, count: u64) {
        self.catalog_entries_skipped.fetch_add(count, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let uptime = self
            .start_time
            .get()
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO);
        let bytes_served = self.bytes_served.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            appcasts_served: self.appcasts_served.load(Ordering::Relaxed),
            files_served: self.files_served.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            bytes_served,
            bytes_served_human: human_bytes(bytes_served),
            catalog_entries_skipped: self.catalog_entries_skipped.load(Ordering::Relaxed),
            uptime_secs: uptime.as_secs(),
        }
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub appcasts_served: u64,
    pub files_served: u64,
    pub failures: u64,
    pub bytes_served: u64,
    /// Human-readable bytes served
    pub bytes_served_human: String,
    pub catalog_entries_skipped: u64,
    /// Server uptime in seconds
    pub uptime_secs: u64,
}

/// Format bytes as human-readable string
fn human_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
