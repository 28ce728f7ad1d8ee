// ==============================================================================
// models.rs - Report Data Contract Models
// ==============================================================================
// Description: Typed shapes of analysis_results.json and variants.json
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// File name of the analysis summary document
pub const SUMMARY_DOCUMENT: &str = "analysis_results.json";

/// File name of the variant list document
pub const VARIANTS_DOCUMENT: &str = "variants.json";

/// Summary statistics produced upstream for one report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_variants: u64,

    pub snp_count: u64,

    pub indel_count: u64,

    /// Share of SNPs, 0.0 to 100.0
    pub snp_percentage: f64,

    /// Share of indels, 0.0 to 100.0
    pub indel_percentage: f64,

    /// None when the upstream call set was empty
    pub most_common_chromosome: Option<String>,

    /// Bucket label (e.g., "0.0-0.1") -> count, in the order the producer wrote them
    pub af_histogram: IndexMap<String, u64>,

    /// Chromosome label -> count, in source order
    pub chromosome_counts: IndexMap<String, u64>,
}

/// One filtered variant row as emitted upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Chromosome label (e.g., "chr1", "17")
    pub chrom: String,

    /// 1-based position
    pub pos: u64,

    /// Reference allele
    #[serde(rename = "ref")]
    pub ref_allele: String,

    /// Alternate allele
    #[serde(rename = "alt")]
    pub alt_allele: String,

    /// Allele frequency (0.0-1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub af: Option<f64>,

    /// Read depth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<u64>,

    /// Phred-scaled call quality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qual: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinvar_significance: Option<String>,
}
