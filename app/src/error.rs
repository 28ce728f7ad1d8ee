// ==============================================================================
// error.rs - Report Error Taxonomy
// ==============================================================================
// Description: Fetch, schema, and misuse errors for the report core
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use thiserror::Error;

/// A required field is missing or mistyped in a fetched document
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid {document}: field '{field}' {reason}")]
pub struct SchemaError {
    /// Document name (e.g., "analysis_results.json")
    pub document: String,

    /// Field path within the document (e.g., "total_variants", "[3].pos")
    pub field: String,

    /// What was wrong with the field
    pub reason: String,
}

impl SchemaError {
    pub fn new(
        document: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            document: document.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Network, HTTP, or filesystem failure retrieving a document
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid report location '{0}'")]
    InvalidBase(String),

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Internal misuse of the core (not a runtime condition)
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid argument '{name}': {reason}")]
pub struct InvalidArgument {
    pub name: &'static str,
    pub reason: String,
}

/// Anything that can stop one report section from rendering
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}

/// Failure turning a report view into output text
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write report: {0}")]
    Fmt(#[from] std::fmt::Error),
}
