// ==============================================================================
// projector.rs - Aggregation Projector
// ==============================================================================
// Description: Reshapes the analysis summary into summary cards and chart datasets
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// The summary document is the single source of truth: nothing here recounts
// variants, and bucket/chromosome order is taken as the producer wrote it.
// ==============================================================================

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::formatter::{format_count_with_share, UNKNOWN_LABEL};
use crate::models::AnalysisSummary;

/// One labelled stat card at the top of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
}

/// One (label, count) pair of a chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: u64,
}

/// Suggested chart type for a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
}

/// Ordered, chart-ready series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub title: String,
    pub kind: ChartKind,
    pub points: Vec<DataPoint>,
}

impl ChartDataset {
    fn from_counts(title: &str, kind: ChartKind, counts: &IndexMap<String, u64>) -> Self {
        Self {
            title: title.to_string(),
            kind,
            points: counts
                .iter()
                .map(|(label, value)| DataPoint {
                    label: label.clone(),
                    value: *value,
                })
                .collect(),
        }
    }

    /// Largest value in the series (0 for an empty series)
    pub fn max_value(&self) -> u64 {
        self.points.iter().map(|p| p.value).max().unwrap_or(0)
    }

    /// Points as (label, value) tuples
    pub fn pairs(&self) -> Vec<(&str, u64)> {
        self.points
            .iter()
            .map(|p| (p.label.as_str(), p.value))
            .collect()
    }
}

/// Stat cards: total, SNPs, indels, most common chromosome
pub fn summary_cards(summary: &AnalysisSummary) -> Vec<SummaryCard> {
    vec![
        SummaryCard {
            title: "Total Variants".to_string(),
            value: summary.total_variants.to_string(),
        },
        SummaryCard {
            title: "SNPs".to_string(),
            value: format_count_with_share(summary.snp_count, summary.snp_percentage),
        },
        SummaryCard {
            title: "Indels".to_string(),
            value: format_count_with_share(summary.indel_count, summary.indel_percentage),
        },
        SummaryCard {
            title: "Most Common Chromosome".to_string(),
            value: summary
                .most_common_chromosome
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        },
    ]
}

/// SNP vs indel split for a pie chart
pub fn variant_type_dataset(summary: &AnalysisSummary) -> ChartDataset {
    ChartDataset {
        title: "Variant Types".to_string(),
        kind: ChartKind::Pie,
        points: vec![
            DataPoint {
                label: "SNPs".to_string(),
                value: summary.snp_count,
            },
            DataPoint {
                label: "Indels".to_string(),
                value: summary.indel_count,
            },
        ],
    }
}

/// Allele-frequency histogram, buckets in source order
pub fn af_histogram_dataset(summary: &AnalysisSummary) -> ChartDataset {
    ChartDataset::from_counts(
        "Allele Frequency Distribution",
        ChartKind::Bar,
        &summary.af_histogram,
    )
}

/// Variants per chromosome, in source order
pub fn chromosome_dataset(summary: &AnalysisSummary) -> ChartDataset {
    ChartDataset::from_counts(
        "Variants per Chromosome",
        ChartKind::Bar,
        &summary.chromosome_counts,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> AnalysisSummary {
        AnalysisSummary {
            total_variants: 10,
            snp_count: 8,
            indel_count: 2,
            snp_percentage: 80.0,
            indel_percentage: 20.0,
            most_common_chromosome: Some("chr1".to_string()),
            af_histogram: IndexMap::from([
                ("0.0-0.5".to_string(), 6),
                ("0.5-1.0".to_string(), 4),
            ]),
            chromosome_counts: IndexMap::from([
                ("chr1".to_string(), 6),
                ("chr2".to_string(), 4),
            ]),
        }
    }

    #[test]
    fn test_variant_type_dataset() {
        let dataset = variant_type_dataset(&summary());
        assert_eq!(dataset.pairs(), vec![("SNPs", 8), ("Indels", 2)]);
        assert_eq!(dataset.kind, ChartKind::Pie);
    }

    #[test]
    fn test_summary_cards() {
        let values: Vec<String> = summary_cards(&summary())
            .into_iter()
            .map(|c| c.value)
            .collect();
        assert_eq!(values, vec!["10", "8 (80.0%)", "2 (20.0%)", "chr1"]);
    }

    #[test]
    fn test_summary_card_without_chromosome() {
        let mut summary = summary();
        summary.most_common_chromosome = None;
        let cards = summary_cards(&summary);
        assert_eq!(cards[3].title, "Most Common Chromosome");
        assert_eq!(cards[3].value, "Unknown");
    }

    #[test]
    fn test_af_histogram_taken_verbatim() {
        let mut summary = summary();
        summary.af_histogram = IndexMap::from([
            ("0.0-0.1".to_string(), 5),
            ("0.1-0.2".to_string(), 3),
        ]);

        let dataset = af_histogram_dataset(&summary);
        assert_eq!(dataset.pairs(), vec![("0.0-0.1", 5), ("0.1-0.2", 3)]);
    }

    #[test]
    fn test_chromosome_dataset_keeps_source_order() {
        let mut summary = summary();
        summary.chromosome_counts = IndexMap::from([
            ("chr2".to_string(), 4),
            ("chr10".to_string(), 1),
            ("chr1".to_string(), 5),
        ]);

        let dataset = chromosome_dataset(&summary);
        assert_eq!(dataset.pairs(), vec![("chr2", 4), ("chr10", 1), ("chr1", 5)]);
        assert_eq!(dataset.max_value(), 5);
    }

    #[test]
    fn test_empty_histogram() {
        let mut summary = summary();
        summary.af_histogram.clear();
        let dataset = af_histogram_dataset(&summary);
        assert!(dataset.points.is_empty());
        assert_eq!(dataset.max_value(), 0);
    }
}
