// ==============================================================================
// state.rs - Application State Management
// ==============================================================================
// Description: Shared state for the report server (served directory, settings)
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use variant_report::table::DEFAULT_ROW_CAP;

/// Default listening port
pub const DEFAULT_PORT: u16 = 8000;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Directory holding index.html, analysis_results.json, variants.json
    report_dir: PathBuf,

    /// Address the server binds to
    bind_addr: SocketAddr,

    /// Row cap used when a request does not name one
    default_row_cap: i64,
}

impl AppState {
    /// Create application state from environment
    pub fn from_env() -> Result<Self> {
        let report_dir = PathBuf::from(std::env::var("REPORT_DIR").unwrap_or_else(|_| ".".to_string()));

        let port = match std::env::var("REPORT_PORT") {
            Ok(port) => port.parse::<u16>().context("REPORT_PORT must be a port number")?,
            Err(_) => DEFAULT_PORT,
        };

        let bind_ip: IpAddr = std::env::var("REPORT_BIND")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse()
            .context("REPORT_BIND must be an IP address")?;

        let default_row_cap = match std::env::var("REPORT_ROW_CAP") {
            Ok(cap) => cap.parse::<i64>().context("REPORT_ROW_CAP must be an integer")?,
            Err(_) => DEFAULT_ROW_CAP,
        };
        if default_row_cap <= 0 {
            anyhow::bail!("REPORT_ROW_CAP must be positive (got {})", default_row_cap);
        }

        if !report_dir.is_dir() {
            anyhow::bail!("REPORT_DIR {} is not a directory", report_dir.display());
        }

        Ok(Self::new(report_dir, SocketAddr::new(bind_ip, port), default_row_cap))
    }

    pub fn new(report_dir: PathBuf, bind_addr: SocketAddr, default_row_cap: i64) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                report_dir,
                bind_addr,
                default_row_cap,
            }),
        }
    }

    /// Get served report directory
    pub fn report_dir(&self) -> &Path {
        &self.inner.report_dir
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.inner.bind_addr
    }

    pub fn default_row_cap(&self) -> i64 {
        self.inner.default_row_cap
    }

    /// State serving a given directory (for tests)
    #[cfg(test)]
    pub fn for_dir(dir: &Path) -> Self {
        Self::new(
            dir.to_path_buf(),
            SocketAddr::from(([127, 0, 0, 1], 0)),
            DEFAULT_ROW_CAP,
        )
    }
}
