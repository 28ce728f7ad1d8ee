// ==============================================================================
// render/json.rs - JSON Report Output
// ==============================================================================
// Description: Serializes the report view as pretty-printed JSON
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use crate::error::RenderError;
use crate::report::{ReportView, Section};

use super::{filter_rows, Renderer};

pub struct JsonRenderer {
    filter: Option<String>,
}

impl JsonRenderer {
    pub fn new(filter: Option<String>) -> Self {
        Self { filter }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, report: &ReportView) -> Result<String, RenderError> {
        // Rows stay in list order; the sort directive travels with them
        let Some(filter) = self.filter.as_deref() else {
            return Ok(serde_json::to_string_pretty(report)?);
        };

        let mut filtered = report.clone();
        if let Section::Ready { data } = &mut filtered.table_rows {
            data.rows = filter_rows(&data.rows, Some(filter));
        }
        Ok(serde_json::to_string_pretty(&filtered)?)
    }
}
