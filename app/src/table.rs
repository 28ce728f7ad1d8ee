// ==============================================================================
// table.rs - Variant Table Projector
// ==============================================================================
// Description: Truncates the variant list and maps each variant to a display row
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Rows are emitted in list order. The default ordering (chromosome label, then
// position) travels with the projection as a SortDirective and is executed by
// whichever renderer consumes it.
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::error::InvalidArgument;
use crate::formatter::{
    format_clinical_significance, format_depth, format_frequency, format_quality,
};
use crate::models::Variant;

/// Rows kept for display when no cap is configured
pub const DEFAULT_ROW_CAP: i64 = 1000;

/// Table columns, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Chromosome,
    Position,
    Reference,
    Alternate,
    AlleleFrequency,
    ReadDepth,
    Quality,
    ClinicalSignificance,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Chromosome,
        Column::Position,
        Column::Reference,
        Column::Alternate,
        Column::AlleleFrequency,
        Column::ReadDepth,
        Column::Quality,
        Column::ClinicalSignificance,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Chromosome => "Chromosome",
            Column::Position => "Position",
            Column::Reference => "Reference",
            Column::Alternate => "Alternate",
            Column::AlleleFrequency => "Allele Frequency",
            Column::ReadDepth => "Read Depth",
            Column::Quality => "Quality",
            Column::ClinicalSignificance => "Clinical Significance",
        }
    }
}

/// Ordering the presentation layer applies to the rows: each column
/// ascending, later columns breaking ties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    pub keys: Vec<Column>,
}

impl SortDirective {
    /// Chromosome label ascending, then position ascending
    pub fn by_locus() -> Self {
        Self {
            keys: vec![Column::Chromosome, Column::Position],
        }
    }

    /// Compare two rows key by key
    pub fn compare(&self, a: &TableRow, b: &TableRow) -> Ordering {
        for column in &self.keys {
            let ord = a.compare_column(b, *column);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl Default for SortDirective {
    fn default() -> Self {
        Self::by_locus()
    }
}

/// One display row of the variant table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub chromosome: String,
    pub position: u64,
    pub reference: String,
    pub alternate: String,
    pub allele_frequency: String,
    /// Blank when the variant has no depth
    pub read_depth: String,
    pub quality: String,
    pub clinical_significance: String,
}

impl TableRow {
    pub fn from_variant(variant: &Variant) -> Self {
        Self {
            chromosome: variant.chrom.clone(),
            position: variant.pos,
            reference: variant.ref_allele.clone(),
            alternate: variant.alt_allele.clone(),
            allele_frequency: format_frequency(variant.af),
            read_depth: format_depth(variant.dp),
            quality: format_quality(variant.qual),
            clinical_significance: format_clinical_significance(
                variant.clinvar_significance.as_deref(),
            ),
        }
    }

    /// Cell text for a column
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Chromosome => self.chromosome.clone(),
            Column::Position => self.position.to_string(),
            Column::Reference => self.reference.clone(),
            Column::Alternate => self.alternate.clone(),
            Column::AlleleFrequency => self.allele_frequency.clone(),
            Column::ReadDepth => self.read_depth.clone(),
            Column::Quality => self.quality.clone(),
            Column::ClinicalSignificance => self.clinical_significance.clone(),
        }
    }

    /// Column-aware comparison: numeric columns compare by value, blanks first
    pub fn compare_column(&self, other: &TableRow, column: Column) -> Ordering {
        match column {
            Column::Position => self.position.cmp(&other.position),
            Column::AlleleFrequency | Column::ReadDepth | Column::Quality => {
                let a = self.cell(column).parse::<f64>().ok();
                let b = other.cell(column).parse::<f64>().ok();
                match (a, b) {
                    (Some(a), Some(b)) => a.total_cmp(&b),
                    (None, Some(_)) => Ordering::Less,
                    (Some(_), None) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
            _ => self.cell(column).cmp(&other.cell(column)),
        }
    }
}

/// Display-ready variant table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableProjection {
    /// First `row_cap` variants, in list order
    pub rows: Vec<TableRow>,

    /// Length of the variant list before truncation
    pub total_rows: usize,

    pub truncated: bool,

    pub sort: SortDirective,
}

/// Project at most `row_cap` variants into display rows
pub fn project_table(variants: &[Variant], row_cap: i64) -> Result<TableProjection, InvalidArgument> {
    if row_cap <= 0 {
        return Err(InvalidArgument {
            name: "row_cap",
            reason: format!("must be a positive integer (got {})", row_cap),
        });
    }
    let cap = usize::try_from(row_cap).unwrap_or(usize::MAX);

    let rows: Vec<TableRow> = variants
        .iter()
        .take(cap)
        .map(TableRow::from_variant)
        .collect();
    let truncated = variants.len() > rows.len();

    debug!(
        "Projected {} of {} variants (cap {})",
        rows.len(),
        variants.len(),
        row_cap
    );

    Ok(TableProjection {
        rows,
        total_rows: variants.len(),
        truncated,
        sort: SortDirective::by_locus(),
    })
}
