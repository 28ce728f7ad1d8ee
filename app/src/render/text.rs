// ==============================================================================
// render/text.rs - Terminal Report Output
// ==============================================================================
// Description: Plain-text report with stat cards, bar charts, and variant table
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use std::fmt::Write;

use crate::error::RenderError;
use crate::projector::{ChartDataset, SummaryCard};
use crate::report::{ReportView, Section};
use crate::table::{Column, TableProjection};

use super::{Renderer, TableView};

/// Widest bar drawn for the largest value of a chart
const BAR_WIDTH: u64 = 40;

pub struct TextRenderer {
    filter: Option<String>,
}

impl TextRenderer {
    pub fn new(filter: Option<String>) -> Self {
        Self { filter }
    }

    fn write_cards(&self, out: &mut String, cards: &Section<Vec<SummaryCard>>) -> std::fmt::Result {
        writeln!(out, "Summary")?;
        match cards {
            Section::Ready { data } => {
                let width = data.iter().map(|c| c.title.len()).max().unwrap_or(0);
                for card in data {
                    writeln!(out, "  {:<width$}  {}", card.title, card.value, width = width)?;
                }
            }
            Section::Failed { error } => writeln!(out, "  [error] {}", error)?,
        }
        writeln!(out)
    }

    fn write_chart(&self, out: &mut String, title: &str, chart: &Section<ChartDataset>) -> std::fmt::Result {
        match chart {
            Section::Ready { data } => {
                writeln!(out, "{}", data.title)?;
                if data.points.is_empty() {
                    writeln!(out, "  (no data)")?;
                }
                let max = data.max_value();
                let width = data.points.iter().map(|p| p.label.len()).max().unwrap_or(0);
                for point in &data.points {
                    let bar = if max == 0 {
                        0
                    } else {
                        (point.value * BAR_WIDTH + max / 2) / max
                    };
                    writeln!(
                        out,
                        "  {:<width$}  {:<bar_width$}  {}",
                        point.label,
                        "#".repeat(bar as usize),
                        point.value,
                        width = width,
                        bar_width = BAR_WIDTH as usize
                    )?;
                }
            }
            Section::Failed { error } => {
                writeln!(out, "{}", title)?;
                writeln!(out, "  [error] {}", error)?;
            }
        }
        writeln!(out)
    }

    fn write_table(&self, out: &mut String, table: &Section<TableProjection>) -> std::fmt::Result {
        writeln!(out, "Variants")?;
        let table = match table {
            Section::Ready { data } => data,
            Section::Failed { error } => return writeln!(out, "  [error] {}", error),
        };

        let view = TableView::prepare(table, self.filter.as_deref());
        writeln!(out, "  {}", view.caption())?;

        let widths: Vec<usize> = Column::ALL
            .iter()
            .map(|c| {
                view.rows
                    .iter()
                    .map(|r| r.cell(*c).len())
                    .max()
                    .unwrap_or(0)
                    .max(c.header().len())
            })
            .collect();

        let header: Vec<String> = Column::ALL
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<w$}", c.header(), w = *w))
            .collect();
        writeln!(out, "  {}", header.join("  ").trim_end())?;

        for row in &view.rows {
            let cells: Vec<String> = Column::ALL
                .iter()
                .zip(&widths)
                .map(|(c, w)| match c {
                    Column::Position => format!("{:>w$}", row.cell(*c), w = *w),
                    _ => format!("{:<w$}", row.cell(*c), w = *w),
                })
                .collect();
            writeln!(out, "  {}", cells.join("  ").trim_end())?;
        }
        Ok(())
    }
}

impl Renderer for TextRenderer {
    fn render(&self, report: &ReportView) -> Result<String, RenderError> {
        let mut out = String::new();
        writeln!(out, "Variant Analysis Report")?;
        writeln!(out, "Source:    {}", report.source)?;
        writeln!(
            out,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(out)?;

        self.write_cards(&mut out, &report.summary_cards)?;
        self.write_chart(&mut out, "Variant Types", &report.variant_type_dataset)?;
        self.write_chart(&mut out, "Allele Frequency Distribution", &report.af_histogram_dataset)?;
        self.write_chart(&mut out, "Variants per Chromosome", &report.chromosome_dataset)?;
        self.write_table(&mut out, &report.table_rows)?;

        Ok(out)
    }
}
