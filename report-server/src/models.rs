// ==============================================================================
// models.rs - API Data Models
// ==============================================================================
// Description: Request/response models for the report server
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters for GET /api/report
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Maximum table rows (server default when absent)
    pub row_cap: Option<i64>,

    /// json (default), html, or text
    pub format: Option<String>,

    /// Case-insensitive table filter
    pub filter: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Readiness check response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub report_dir: bool,
    pub summary_document: bool,
    pub variants_document: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
