// ==============================================================================
// render/html.rs - Self-Contained HTML Report
// ==============================================================================
// Description: Single-file HTML page (no external scripts or stylesheets)
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Security: every document-derived string is HTML-escaped before insertion
// ==============================================================================

use std::fmt::Write;

use crate::error::RenderError;
use crate::projector::{ChartDataset, ChartKind, SummaryCard};
use crate::report::{ReportView, Section};
use crate::table::{Column, TableProjection};

use super::{Renderer, TableView};

pub struct HtmlRenderer {
    filter: Option<String>,
}

impl HtmlRenderer {
    pub fn new(filter: Option<String>) -> Self {
        Self { filter }
    }

    fn cards(&self, cards: &Section<Vec<SummaryCard>>) -> Result<String, std::fmt::Error> {
        let mut html = String::from("<section id=\"summary\">\n<h2>Summary</h2>\n");
        match cards {
            Section::Ready { data } => {
                for card in data {
                    writeln!(
                        html,
                        "<div class=\"card\"><h3>{}</h3><p>{}</p></div>",
                        escape(&card.title),
                        escape(&card.value)
                    )?;
                }
            }
            Section::Failed { error } => html.push_str(&error_block(error)),
        }
        html.push_str("</section>\n");
        Ok(html)
    }

    fn chart(&self, id: &str, title: &str, chart: &Section<ChartDataset>) -> Result<String, std::fmt::Error> {
        let mut html = format!("<section id=\"{}\">\n", id);
        match chart {
            Section::Ready { data } => {
                writeln!(
                    html,
                    "<h2>{}</h2>\n<table class=\"chart chart-{}\">",
                    escape(&data.title),
                    match data.kind {
                        ChartKind::Pie => "pie",
                        ChartKind::Bar => "bar",
                    }
                )?;
                let max = data.max_value();
                for point in &data.points {
                    let pct = if max == 0 {
                        0.0
                    } else {
                        point.value as f64 / max as f64 * 100.0
                    };
                    writeln!(
                        html,
                        "<tr><th>{}</th><td><div class=\"bar\" style=\"width: {:.1}%\"></div></td><td>{}</td></tr>",
                        escape(&point.label),
                        pct,
                        point.value
                    )?;
                }
                html.push_str("</table>\n");
            }
            Section::Failed { error } => {
                writeln!(html, "<h2>{}</h2>", escape(title))?;
                html.push_str(&error_block(error));
            }
        }
        html.push_str("</section>\n");
        Ok(html)
    }

    fn table(&self, table: &Section<TableProjection>) -> Result<String, std::fmt::Error> {
        let mut html = String::from("<section id=\"variants\">\n<h2>Variants</h2>\n");
        let table = match table {
            Section::Ready { data } => data,
            Section::Failed { error } => {
                html.push_str(&error_block(error));
                html.push_str("</section>\n");
                return Ok(html);
            }
        };

        let view = TableView::prepare(table, self.filter.as_deref());
        writeln!(html, "<p class=\"caption\">{}</p>", escape(&view.caption()))?;
        html.push_str("<table class=\"variants\">\n<thead><tr>");
        for column in Column::ALL {
            write!(html, "<th>{}</th>", escape(column.header()))?;
        }
        html.push_str("</tr></thead>\n<tbody>\n");
        for row in &view.rows {
            html.push_str("<tr>");
            for column in Column::ALL {
                write!(html, "<td>{}</td>", escape(&row.cell(column)))?;
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n</section>\n");
        Ok(html)
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, report: &ReportView) -> Result<String, RenderError> {
        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Variant Analysis Report</title>
<style>.bar {{ background: #4a90d9; height: 1em; }} .error {{ color: #b00020; }}</style>
</head>
<body>
<h1>Variant Analysis Report</h1>
<p class="meta">Source: {source} &middot; Generated: {generated}</p>
{cards}{variant_types}{af_histogram}{chromosomes}{table}</body>
</html>
"#,
            source = escape(&report.source),
            generated = report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            cards = self.cards(&report.summary_cards)?,
            variant_types = self.chart("variant-types", "Variant Types", &report.variant_type_dataset)?,
            af_histogram = self.chart(
                "af-histogram",
                "Allele Frequency Distribution",
                &report.af_histogram_dataset
            )?,
            chromosomes = self.chart(
                "chromosomes",
                "Variants per Chromosome",
                &report.chromosome_dataset
            )?,
            table = self.table(&report.table_rows)?,
        ))
    }
}

fn error_block(message: &str) -> String {
    format!("<p class=\"error\">{}</p>\n", escape(message))
}

/// Minimal HTML escaping for text and attribute content
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
