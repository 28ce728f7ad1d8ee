// ==============================================================================
// report.rs - Report Assembly
// ==============================================================================
// Description: Fetches, validates, and projects both report documents with
//              section-scoped failure isolation
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================
// Sections:
//   - Summary (stat cards + three charts) <- analysis_results.json
//   - Table (variant rows)                <- variants.json
//   A failure in one section never prevents the other from loading.
// ==============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{InvalidArgument, ReportError};
use crate::fetch::DocumentSource;
use crate::models::{AnalysisSummary, SUMMARY_DOCUMENT, VARIANTS_DOCUMENT};
use crate::projector::{
    af_histogram_dataset, chromosome_dataset, summary_cards, variant_type_dataset, ChartDataset,
    SummaryCard,
};
use crate::table::{project_table, TableProjection, DEFAULT_ROW_CAP};
use crate::validator::SchemaValidator;

/// Everything derived from analysis_results.json
#[derive(Debug, Clone)]
pub struct SummarySection {
    pub summary: AnalysisSummary,
    pub cards: Vec<SummaryCard>,
    pub variant_types: ChartDataset,
    pub af_histogram: ChartDataset,
    pub chromosomes: ChartDataset,
}

impl SummarySection {
    pub fn from_summary(summary: AnalysisSummary) -> Self {
        Self {
            cards: summary_cards(&summary),
            variant_types: variant_type_dataset(&summary),
            af_histogram: af_histogram_dataset(&summary),
            chromosomes: chromosome_dataset(&summary),
            summary,
        }
    }
}

/// One loaded report; each section either loaded or failed on its own
#[derive(Debug)]
pub struct Report {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub summary: Result<SummarySection, ReportError>,
    pub table: Result<TableProjection, ReportError>,
}

impl Report {
    /// Serializable, behavior-free projections for a presentation layer
    pub fn view(&self) -> ReportView {
        let summary = self.summary.as_ref().map_err(ToString::to_string);
        let table = self.table.as_ref().map_err(ToString::to_string);

        ReportView {
            source: self.source.clone(),
            generated_at: self.generated_at,
            summary_cards: Section::from_result(summary.clone().map(|s| s.cards.clone())),
            variant_type_dataset: Section::from_result(summary.clone().map(|s| s.variant_types.clone())),
            af_histogram_dataset: Section::from_result(summary.clone().map(|s| s.af_histogram.clone())),
            chromosome_dataset: Section::from_result(summary.clone().map(|s| s.chromosomes.clone())),
            table_rows: Section::from_result(table.cloned()),
        }
    }

    /// True when both sections loaded
    pub fn is_complete(&self) -> bool {
        self.summary.is_ok() && self.table.is_ok()
    }
}

/// A projection, or the message explaining why its section is missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Section<T> {
    Ready { data: T },
    Failed { error: String },
}

impl<T> Section<T> {
    fn from_result(result: Result<T, String>) -> Self {
        match result {
            Ok(data) => Section::Ready { data },
            Err(error) => Section::Failed { error },
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Section::Ready { data } => Some(data),
            Section::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Section::Ready { .. } => None,
            Section::Failed { error } => Some(error),
        }
    }
}

/// The read-only output contract of the report core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub summary_cards: Section<Vec<SummaryCard>>,
    pub variant_type_dataset: Section<ChartDataset>,
    pub af_histogram_dataset: Section<ChartDataset>,
    pub chromosome_dataset: Section<ChartDataset>,
    pub table_rows: Section<TableProjection>,
}

/// Loads both documents from a source and projects them
pub struct ReportLoader {
    validator: SchemaValidator,
    row_cap: i64,
}

impl ReportLoader {
    pub fn new(row_cap: i64) -> Result<Self, InvalidArgument> {
        if row_cap <= 0 {
            return Err(InvalidArgument {
                name: "row_cap",
                reason: format!("must be a positive integer (got {})", row_cap),
            });
        }
        Ok(Self {
            validator: SchemaValidator::new(),
            row_cap,
        })
    }

    pub fn row_cap(&self) -> i64 {
        self.row_cap
    }

    /// Fetch the summary, then the variant list. Neither failure stops the other.
    pub async fn load(&self, source: &dyn DocumentSource) -> Report {
        info!("Loading report from {}", source.location());

        let summary = self.load_summary(source).await;
        if let Err(e) = &summary {
            warn!("Summary section unavailable: {}", e);
        }

        let table = self.load_table(source).await;
        if let Err(e) = &table {
            warn!("Table section unavailable: {}", e);
        }

        Report {
            source: source.location(),
            generated_at: Utc::now(),
            summary,
            table,
        }
    }

    async fn load_summary(&self, source: &dyn DocumentSource) -> Result<SummarySection, ReportError> {
        let bytes = source.fetch(SUMMARY_DOCUMENT).await?;
        let summary = self.validator.parse_summary(&bytes)?;
        Ok(SummarySection::from_summary(summary))
    }

    async fn load_table(&self, source: &dyn DocumentSource) -> Result<TableProjection, ReportError> {
        let bytes = source.fetch(VARIANTS_DOCUMENT).await?;
        let variants = self.validator.parse_variants(&bytes)?;
        Ok(project_table(&variants, self.row_cap)?)
    }
}

impl Default for ReportLoader {
    fn default() -> Self {
        Self {
            validator: SchemaValidator::new(),
            row_cap: DEFAULT_ROW_CAP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::DirectorySource;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// In-memory source that records the order documents were requested in
    struct MemorySource {
        documents: HashMap<&'static str, Vec<u8>>,
        requested: Mutex<Vec<String>>,
    }

    impl MemorySource {
        fn new(documents: Vec<(&'static str, serde_json::Value)>) -> Self {
            Self {
                documents: documents
                    .into_iter()
                    .map(|(name, doc)| (name, serde_json::to_vec(&doc).unwrap()))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DocumentSource for MemorySource {
        async fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError> {
            self.requested.lock().unwrap().push(name.to_string());
            self.documents
                .get(name)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: format!("memory://{}", name),
                    status: 404,
                })
        }

        fn location(&self) -> String {
            "memory://".to_string()
        }
    }

    fn summary_doc() -> serde_json::Value {
        json!({
            "total_variants": 10,
            "snp_count": 8,
            "indel_count": 2,
            "snp_percentage": 80.0,
            "indel_percentage": 20.0,
            "most_common_chromosome": "chr1",
            "af_histogram": {"0.0-0.5": 6, "0.5-1.0": 4},
            "chromosome_counts": {"chr1": 6, "chr2": 4}
        })
    }

    fn variants_doc(n: u64) -> serde_json::Value {
        json!((1..=n)
            .map(|i| json!({"chrom": "chr1", "pos": i, "ref": "A", "alt": "G", "af": 0.5, "dp": 30, "qual": 60.0}))
            .collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let source = MemorySource::new(vec![
            (SUMMARY_DOCUMENT, summary_doc()),
            (VARIANTS_DOCUMENT, variants_doc(5)),
        ]);

        let report = ReportLoader::default().load(&source).await;
        assert!(report.is_complete());

        let view = report.view();
        let cards: Vec<&str> = view
            .summary_cards
            .data()
            .unwrap()
            .iter()
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(cards, vec!["10", "8 (80.0%)", "2 (20.0%)", "chr1"]);
        assert_eq!(
            view.variant_type_dataset.data().unwrap().pairs(),
            vec![("SNPs", 8), ("Indels", 2)]
        );
        assert_eq!(
            view.af_histogram_dataset.data().unwrap().pairs(),
            vec![("0.0-0.5", 6), ("0.5-1.0", 4)]
        );
        assert_eq!(
            view.chromosome_dataset.data().unwrap().pairs(),
            vec![("chr1", 6), ("chr2", 4)]
        );
        assert_eq!(view.table_rows.data().unwrap().rows.len(), 5);
    }

    #[tokio::test]
    async fn test_summary_fetched_before_variants() {
        let source = MemorySource::new(vec![
            (SUMMARY_DOCUMENT, summary_doc()),
            (VARIANTS_DOCUMENT, variants_doc(1)),
        ]);
        ReportLoader::default().load(&source).await;

        let requested = source.requested.lock().unwrap().clone();
        assert_eq!(requested, vec![SUMMARY_DOCUMENT, VARIANTS_DOCUMENT]);
    }

    #[tokio::test]
    async fn test_malformed_summary_leaves_table_rendered() {
        let mut summary = summary_doc();
        summary.as_object_mut().unwrap().remove("total_variants");
        let source = MemorySource::new(vec![
            (SUMMARY_DOCUMENT, summary),
            (VARIANTS_DOCUMENT, variants_doc(3)),
        ]);

        let report = ReportLoader::default().load(&source).await;
        match &report.summary {
            Err(ReportError::Schema(e)) => assert_eq!(e.field, "total_variants"),
            other => panic!("expected schema error, got {:?}", other.as_ref().map(|_| ())),
        }
        assert_eq!(report.table.as_ref().unwrap().rows.len(), 3);

        let view = report.view();
        assert!(view.summary_cards.error().unwrap().contains("total_variants"));
        assert!(view.chromosome_dataset.error().is_some());
        assert!(view.table_rows.data().is_some());
    }

    #[tokio::test]
    async fn test_missing_variants_leaves_summary_rendered() {
        let source = MemorySource::new(vec![(SUMMARY_DOCUMENT, summary_doc())]);

        let report = ReportLoader::default().load(&source).await;
        assert!(report.summary.is_ok());
        assert!(matches!(
            report.table,
            Err(ReportError::Fetch(FetchError::Status { status: 404, .. }))
        ));
        assert!(!report.is_complete());
    }

    #[tokio::test]
    async fn test_summary_fetch_failure_still_fetches_variants() {
        let source = MemorySource::new(vec![(VARIANTS_DOCUMENT, variants_doc(2))]);

        let report = ReportLoader::default().load(&source).await;
        assert!(report.summary.is_err());
        assert_eq!(report.table.unwrap().rows.len(), 2);
    }

    #[tokio::test]
    async fn test_row_cap_applied() {
        let source = MemorySource::new(vec![
            (SUMMARY_DOCUMENT, summary_doc()),
            (VARIANTS_DOCUMENT, variants_doc(30)),
        ]);

        let report = ReportLoader::new(10).unwrap().load(&source).await;
        let table = report.table.unwrap();
        assert_eq!(table.rows.len(), 10);
        assert_eq!(table.total_rows, 30);
        assert!(table.truncated);
    }

    #[test]
    fn test_loader_rejects_non_positive_cap() {
        assert!(ReportLoader::new(0).is_err());
        assert!(ReportLoader::new(-1).is_err());
        assert_eq!(ReportLoader::default().row_cap(), 1000);
    }

    #[tokio::test]
    async fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SUMMARY_DOCUMENT),
            serde_json::to_vec_pretty(&summary_doc()).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join(VARIANTS_DOCUMENT),
            serde_json::to_vec_pretty(&variants_doc(4)).unwrap(),
        )
        .unwrap();

        let report = ReportLoader::default()
            .load(&DirectorySource::new(dir.path()))
            .await;
        assert!(report.is_complete());
    }

    #[test]
    fn test_view_serializes_with_status_tags() {
        let section: Section<u32> = Section::Failed {
            error: "boom".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            json!({"status": "failed", "error": "boom"})
        );

        let section = Section::Ready { data: 7u32 };
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            json!({"status": "ready", "data": 7})
        );
    }
}
