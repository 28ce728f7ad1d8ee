// ==============================================================================
// config.rs - Report Run Configuration
// ==============================================================================
// Description: Validated settings for one report run (source, format, row cap)
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::error::InvalidArgument;
use crate::render::OutputFormat;

/// Settings for one report run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Report location: http(s) URL or local directory
    pub source: String,

    pub format: OutputFormat,

    /// Maximum variant rows shown
    pub row_cap: i64,

    /// Case-insensitive substring filter for the variant table
    pub filter: Option<String>,

    /// Output file; stdout when None
    pub output: Option<PathBuf>,

    /// HTTP client timeout
    pub timeout: Duration,

    /// Fail the run when any section could not be loaded
    pub strict: bool,
}

impl ReportConfig {
    pub fn new(
        source: String,
        format: &str,
        row_cap: i64,
        filter: Option<String>,
        output: Option<PathBuf>,
        timeout_secs: u64,
        strict: bool,
    ) -> Result<Self, InvalidArgument> {
        if row_cap <= 0 {
            return Err(InvalidArgument {
                name: "row_cap",
                reason: format!("must be a positive integer (got {})", row_cap),
            });
        }
        if timeout_secs == 0 {
            return Err(InvalidArgument {
                name: "timeout_secs",
                reason: "must be at least 1 second".to_string(),
            });
        }

        let format = match OutputFormat::parse(format) {
            Some(format) => format,
            None => {
                // Output file extension wins over an unrecognised format name
                let from_extension = output
                    .as_ref()
                    .and_then(|p| p.extension())
                    .and_then(|e| OutputFormat::parse(&e.to_string_lossy()));
                let fallback = from_extension.unwrap_or(OutputFormat::Text);
                warn!("Invalid output format '{}', using {:?}", format, fallback);
                fallback
            }
        };

        Ok(Self {
            source,
            format,
            row_cap,
            filter: filter.filter(|f| !f.trim().is_empty()),
            output,
            timeout: Duration::from_secs(timeout_secs),
            strict,
        })
    }
}
