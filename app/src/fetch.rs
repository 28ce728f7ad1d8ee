// ==============================================================================
// fetch.rs - Report Document Sources
// ==============================================================================
// Description: Retrieves report JSON documents over HTTP or from a local directory
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Policy:
//   - One attempt per document, no retries
//   - Non-2xx HTTP status is a hard failure, never empty data
//   - Timeouts belong to the HTTP client, not to the report core
// ==============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::FetchError;

/// Default HTTP client timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where report documents come from
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch a document by file name, relative to the report location
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError>;

    /// Human-readable location for logs and report headers
    fn location(&self) -> String;
}

/// Documents served over HTTP(S)
pub struct HttpSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut base = Url::parse(base).map_err(|_| FetchError::InvalidBase(base.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(FetchError::InvalidBase(base.to_string()));
        }

        // "/reports/run1" names a directory; "/reports/run1/index.html" a page inside it
        let path = base.path().to_string();
        let last_segment = path.rsplit('/').next().unwrap_or("");
        if !path.ends_with('/') && !last_segment.contains('.') {
            base.set_path(&format!("{}/", path));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Ok(Self { base, client })
    }

    /// Resolve a document name against the report location
    pub fn document_url(&self, name: &str) -> Result<Url, FetchError> {
        self.base
            .join(name)
            .map_err(|_| FetchError::InvalidBase(format!("{}{}", self.base, name)))
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.document_url(name)?;
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        debug!("Received {} bytes from {}", body.len(), url);

        Ok(body.to_vec())
    }

    fn location(&self) -> String {
        self.base.to_string()
    }
}

/// Documents stored in a local report directory
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.dir.join(name);
        info!("Reading {}", path.display());

        tokio::fs::read(&path).await.map_err(|source| FetchError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Pick a source for a report location: http(s) URLs go over the network,
/// anything else is a directory
pub fn source_for(location: &str, timeout: Duration) -> Result<Box<dyn DocumentSource>, FetchError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(DirectorySource::new(location)))
    }
}
