// ==============================================================================
// render/mod.rs - Report Renderers
// ==============================================================================
// Description: Presentation adapters over the report view (text, HTML, JSON)
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

pub mod html;
pub mod json;
pub mod text;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use text::TextRenderer;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::report::ReportView;
use crate::table::{Column, TableProjection, TableRow};

/// Output format for a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

impl OutputFormat {
    /// MIME type for HTTP responses
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain; charset=utf-8",
            OutputFormat::Html => "text/html; charset=utf-8",
            OutputFormat::Json => "application/json",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Some(OutputFormat::Text),
            "html" => Some(OutputFormat::Html),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Turns a report view into output text
pub trait Renderer {
    fn render(&self, report: &ReportView) -> Result<String, RenderError>;
}

/// Renderer for a format; `filter` narrows the variant table
pub fn renderer_for(format: OutputFormat, filter: Option<String>) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::new(filter)),
        OutputFormat::Html => Box::new(HtmlRenderer::new(filter)),
        OutputFormat::Json => Box::new(JsonRenderer::new(filter)),
    }
}

/// Table rows as a renderer shows them: filtered, then sorted by the
/// projection's directive
pub struct TableView {
    pub rows: Vec<TableRow>,
    /// Rows in the projection before filtering
    pub projected: usize,
    /// Rows in the source list before truncation
    pub total: usize,
}

impl TableView {
    pub fn prepare(table: &TableProjection, filter: Option<&str>) -> Self {
        let mut rows = filter_rows(&table.rows, filter);

        // Stable: rows equal under the directive keep list order
        rows.sort_by(|a, b| table.sort.compare(a, b));

        Self {
            rows,
            projected: table.rows.len(),
            total: table.total_rows,
        }
    }

    /// Caption such as "Showing 5 of 1000 rows (2500 variants in source)"
    pub fn caption(&self) -> String {
        let mut caption = format!("Showing {} of {} rows", self.rows.len(), self.projected);
        if self.total > self.projected {
            caption.push_str(&format!(
                " (first {} of {} variants)",
                self.projected, self.total
            ));
        }
        caption
    }
}

/// Rows with any cell containing `filter` (case-insensitive), in list order
pub fn filter_rows(rows: &[TableRow], filter: Option<&str>) -> Vec<TableRow> {
    let needle = filter
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase);

    rows.iter()
        .filter(|row| match &needle {
            Some(needle) => row_matches(row, needle),
            None => true,
        })
        .cloned()
        .collect()
}

fn row_matches(row: &TableRow, needle: &str) -> bool {
    Column::ALL
        .iter()
        .any(|c| row.cell(*c).to_lowercase().contains(needle))
}
